use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::domain::notification::{NewNotification, Notification};
use crate::forms::notifications::AddNotificationForm;
use crate::repository::{BusinessReader, NotificationReader, NotificationWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Record a notification for a business. Always created unread.
pub fn notify<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    form: AddNotificationForm,
) -> ServiceResult<Notification>
where
    R: UserReader + BusinessReader + NotificationWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let message = form.message.trim().to_string();
    if message.is_empty() {
        return Err(ServiceError::Validation(
            "notification message cannot be empty".to_string(),
        ));
    }

    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    let new_notification = NewNotification::new(business.id, message, form.kind);
    repo.create_notification(&new_notification)
        .map_err(ServiceError::from)
}

/// Transition a notification to read. Marking an already-read
/// notification is a no-op.
pub fn mark_read<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
    notification_id: i32,
) -> ServiceResult<Notification>
where
    R: UserReader + BusinessReader + NotificationWriter + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.mark_read(notification_id, business.id)
        .map_err(ServiceError::from)
}

/// Unread notifications, newest first.
pub fn list_unread<R>(
    repo: &R,
    auth: &AuthenticatedUser,
    business_id: i32,
) -> ServiceResult<Vec<Notification>>
where
    R: UserReader + BusinessReader + NotificationReader + ?Sized,
{
    let (_, business) = crate::services::authorize_business(repo, auth, business_id)?;

    repo.list_unread(business.id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::business::Business;
    use crate::domain::notification::NotificationKind;
    use crate::domain::user::User;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn fixed_datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn sample_user() -> User {
        User {
            id: 7,
            external_id: "ext-7".to_string(),
            email: "owner@example.com".to_string(),
            premium: false,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_business() -> Business {
        Business {
            id: 1,
            owner_id: 7,
            name: "Corner Shop".to_string(),
            image: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn auth() -> AuthenticatedUser {
        AuthenticatedUser::new("ext-7", "owner@example.com")
    }

    fn expect_authorized(repo: &mut MockRepository) {
        repo.expect_get_user_by_external_id()
            .returning(|_| Ok(Some(sample_user())));
        repo.expect_get_business_by_id()
            .returning(|_, _| Ok(Some(sample_business())));
    }

    #[test]
    fn notify_rejects_blank_message() {
        let repo = MockRepository::new();
        let form = AddNotificationForm {
            message: "  ".to_string(),
            kind: NotificationKind::Milestone,
        };

        let result = notify(&repo, &auth(), 1, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn mark_read_propagates_not_found() {
        let mut repo = MockRepository::new();
        expect_authorized(&mut repo);
        repo.expect_mark_read()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = mark_read(&repo, &auth(), 1, 999);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
