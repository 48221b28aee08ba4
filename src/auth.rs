//! Identity resolution.
//!
//! The actual identity provider lives outside this service: an upstream
//! proxy authenticates the user and the session endpoint turns its verdict
//! into a cookie session. From then on handlers extract [`AuthenticatedUser`]
//! and receive a `401 Unauthorized` automatically when no session exists.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

/// The externally verified identity attached to a request session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Stable external identifier issued by the identity provider.
    pub sub: String,
    /// Email reported by the identity provider.
    pub email: String,
}

impl AuthenticatedUser {
    pub fn new(sub: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
        }
    }

    /// Serialized form stored as the actix-identity id.
    pub fn to_session_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();

        let user = identity
            .and_then(|identity| identity.id().map_err(Error::from))
            .and_then(|id| {
                serde_json::from_str::<AuthenticatedUser>(&id)
                    .map_err(|_| ErrorUnauthorized("invalid session"))
            });

        ready(user.map_err(|_| ErrorUnauthorized("authentication required")))
    }
}
