use diesel::prelude::*;

use crate::{
    domain::notification::{
        NewNotification as DomainNewNotification, Notification as DomainNotification,
    },
    models::notification::{NewNotification as DbNewNotification, Notification as DbNotification},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, NotificationReader, NotificationWriter},
};

impl NotificationReader for DieselRepository {
    fn list_unread(&self, business_id: i32) -> RepositoryResult<Vec<DomainNotification>> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let rows = notifications::table
            .filter(notifications::business_id.eq(business_id))
            .filter(notifications::status.eq("UNREAD"))
            .order(notifications::created_at.desc())
            .then_order_by(notifications::id.desc())
            .load::<DbNotification>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl NotificationWriter for DieselRepository {
    fn create_notification(
        &self,
        new_notification: &DomainNewNotification,
    ) -> RepositoryResult<DomainNotification> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let db_new = DbNewNotification::from(new_notification);

        let created = diesel::insert_into(notifications::table)
            .values(&db_new)
            .get_result::<DbNotification>(&mut conn)?;

        Ok(created.into())
    }

    fn mark_read(
        &self,
        notification_id: i32,
        business_id: i32,
    ) -> RepositoryResult<DomainNotification> {
        use crate::schema::notifications;

        let mut conn = self.conn()?;
        let now = chrono::Utc::now().naive_utc();

        // The status guard makes the transition one-way at the store: a
        // concurrent second mark matches zero rows and keeps read_at.
        let updated = diesel::update(
            notifications::table
                .filter(notifications::id.eq(notification_id))
                .filter(notifications::business_id.eq(business_id))
                .filter(notifications::status.eq("UNREAD")),
        )
        .set((
            notifications::status.eq("READ"),
            notifications::read_at.eq(Some(now)),
        ))
        .get_result::<DbNotification>(&mut conn)
        .optional()?;

        if let Some(updated) = updated {
            return Ok(updated.into());
        }

        // Zero rows: either already read (return it as stored) or absent.
        let existing = notifications::table
            .filter(notifications::id.eq(notification_id))
            .filter(notifications::business_id.eq(business_id))
            .first::<DbNotification>(&mut conn)
            .optional()?
            .ok_or(RepositoryError::NotFound)?;

        Ok(existing.into())
    }
}
