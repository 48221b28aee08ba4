use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::notification::{
    NewNotification as DomainNewNotification, Notification as DomainNotification,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct Notification {
    pub id: i32,
    pub business_id: i32,
    pub message: String,
    pub kind: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub read_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification<'a> {
    pub business_id: i32,
    pub message: &'a str,
    pub kind: &'a str,
    pub status: &'a str,
}

impl From<Notification> for DomainNotification {
    fn from(value: Notification) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            message: value.message,
            kind: value.kind.as_str().into(),
            status: value.status.as_str().into(),
            created_at: value.created_at,
            read_at: value.read_at,
        }
    }
}

impl<'a> From<&'a DomainNewNotification> for NewNotification<'a> {
    fn from(value: &'a DomainNewNotification) -> Self {
        Self {
            business_id: value.business_id,
            message: value.message.as_str(),
            kind: value.kind.into(),
            status: "UNREAD",
        }
    }
}
