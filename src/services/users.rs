use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::domain::business::Business;
use crate::domain::user::{NewUser, OnboardingState, User};
use crate::repository::{BusinessReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// Profile returned to the presentation layer. The onboarding state is
/// computed here so clients never have to re-derive it from status codes.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: User,
    pub businesses: Vec<Business>,
    pub state: OnboardingState,
    /// Whether this call created the account (first authenticated access).
    #[serde(skip)]
    pub created: bool,
}

/// Find-or-create the account behind an authenticated identity and report
/// its onboarding state.
pub fn onboard<R>(repo: &R, auth: &AuthenticatedUser) -> ServiceResult<Profile>
where
    R: UserReader + UserWriter + BusinessReader + ?Sized,
{
    let existing = repo
        .get_user_by_external_id(&auth.sub)
        .map_err(ServiceError::from)?;

    let (user, created) = match existing {
        Some(user) => (user, false),
        None => {
            let new_user = NewUser::new(&auth.sub, &auth.email);
            (repo.create_user(&new_user).map_err(ServiceError::from)?, true)
        }
    };

    let businesses = repo.list_businesses(user.id).map_err(ServiceError::from)?;
    let state = if businesses.is_empty() {
        OnboardingState::NoBusiness
    } else {
        OnboardingState::HasBusiness
    };

    Ok(Profile {
        user,
        businesses,
        state,
        created,
    })
}

/// Upgrade the account to premium. Idempotent: upgrading an already
/// premium account returns it unchanged.
pub fn upgrade<R>(repo: &R, auth: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user = crate::services::require_user(repo, auth)?;

    if user.premium {
        return Ok(user);
    }

    repo.set_premium(&auth.sub).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use mockall::predicate::eq;

    use crate::repository::mock::MockRepository;

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn sample_user(premium: bool) -> User {
        User {
            id: 7,
            external_id: "ext-7".to_string(),
            email: "owner@example.com".to_string(),
            premium,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn auth() -> AuthenticatedUser {
        AuthenticatedUser::new("ext-7", "owner@example.com")
    }

    #[test]
    fn onboard_creates_account_on_first_access() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_external_id()
            .with(eq("ext-7"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create_user()
            .times(1)
            .returning(|_| Ok(sample_user(false)));
        repo.expect_list_businesses()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let profile = onboard(&repo, &auth()).expect("onboarding should succeed");

        assert!(profile.created);
        assert_eq!(profile.state, OnboardingState::NoBusiness);
    }

    #[test]
    fn onboard_reuses_existing_account() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_external_id()
            .times(1)
            .returning(|_| Ok(Some(sample_user(false))));
        repo.expect_list_businesses().times(1).returning(|_| {
            Ok(vec![Business {
                id: 1,
                owner_id: 7,
                name: "Corner Shop".to_string(),
                image: None,
                created_at: fixed_datetime(),
                updated_at: fixed_datetime(),
            }])
        });

        let profile = onboard(&repo, &auth()).expect("onboarding should succeed");

        assert!(!profile.created);
        assert_eq!(profile.state, OnboardingState::HasBusiness);
    }

    #[test]
    fn upgrade_is_idempotent_for_premium_accounts() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_external_id()
            .times(1)
            .returning(|_| Ok(Some(sample_user(true))));
        repo.expect_set_premium().times(0);

        let user = upgrade(&repo, &auth()).expect("upgrade should succeed");

        assert!(user.premium);
    }

    #[test]
    fn upgrade_sets_premium_flag() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_by_external_id()
            .times(1)
            .returning(|_| Ok(Some(sample_user(false))));
        repo.expect_set_premium()
            .with(eq("ext-7"))
            .times(1)
            .returning(|_| Ok(sample_user(true)));

        let user = upgrade(&repo, &auth()).expect("upgrade should succeed");

        assert!(user.premium);
    }
}
