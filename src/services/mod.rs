pub use errors::{ServiceError, ServiceResult};

use crate::auth::AuthenticatedUser;
use crate::domain::business::Business;
use crate::domain::user::User;
use crate::repository::{BusinessReader, UserReader};

pub mod errors;

pub mod analytics;
pub mod billing;
pub mod businesses;
pub mod notifications;
pub mod products;
pub mod users;

/// Resolve the authenticated identity to its internal account.
///
/// An identity without an onboarded account is treated as not found; the
/// profile endpoint is the only place accounts are created.
pub fn require_user<R>(repo: &R, auth: &AuthenticatedUser) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    repo.get_user_by_external_id(&auth.sub)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// The access-control gate every business-scoped operation passes through:
/// the business must exist AND belong to the caller, otherwise `NotFound`.
pub fn authorize_business<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
) -> ServiceResult<(User, Business)>
where
    R: UserReader + BusinessReader + ?Sized,
{
    let user = require_user(repo, auth)?;
    let business = repo
        .get_business_by_id(business_id, user.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    Ok((user, business))
}
