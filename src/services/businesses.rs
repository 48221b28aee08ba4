use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::business::{Business, NewBusiness};
use crate::forms::businesses::AddBusinessForm;
use crate::repository::{BusinessReader, BusinessWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Creates a business for the authenticated account.
///
/// Non-premium accounts may own at most one business; the count is taken
/// from the owner's business list, never from request state.
pub fn create_business<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    form: AddBusinessForm,
) -> ServiceResult<Business>
where
    R: UserReader + BusinessReader + BusinessWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "business name cannot be empty".to_string(),
        ));
    }

    let user = crate::services::require_user(repo, auth)?;

    let owned = repo.list_businesses(user.id).map_err(ServiceError::from)?;
    if !owned.is_empty() && !user.premium {
        return Err(ServiceError::PremiumRequired);
    }

    let mut new_business = NewBusiness::new(user.id, name);
    if let Some(image) = form.image.filter(|value| !value.trim().is_empty()) {
        new_business = new_business.with_image(image);
    }

    repo.create_business(&new_business)
        .map_err(ServiceError::from)
}

/// Fetch one business, gated on ownership.
pub fn get_business<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
) -> ServiceResult<Business>
where
    R: UserReader + BusinessReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;
    Ok(business)
}

/// All businesses owned by the authenticated account.
pub fn list_businesses<R>(repo: &R, auth: &AuthenticatedUser) -> ServiceResult<Vec<Business>>
where
    R: UserReader + BusinessReader + ?Sized,
{
    let user = crate::services::require_user(repo, auth)?;
    repo.list_businesses(user.id).map_err(ServiceError::from)
}
