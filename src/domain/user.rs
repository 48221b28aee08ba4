use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Internal account backing an externally authenticated identity.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// Internal identifier.
    pub id: i32,
    /// Stable identifier issued by the external identity provider.
    pub external_id: String,
    /// Email reported by the identity provider at onboarding.
    pub email: String,
    /// Whether the account may own more than one business.
    pub premium: bool,
    /// Timestamp for when the account was first seen.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the account.
    pub updated_at: NaiveDateTime,
}

/// Payload required to create an account on first authenticated access.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub external_id: String,
    pub email: String,
}

impl NewUser {
    pub fn new(external_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            email: email.into(),
        }
    }
}

/// Server-side onboarding state, computed from the account's business list.
///
/// The unauthenticated case never reaches this enum: requests without a
/// session are rejected by the identity extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    /// The account exists but owns no business yet.
    NoBusiness,
    /// The account owns at least one business.
    HasBusiness,
}
