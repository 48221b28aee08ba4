use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// In-app alert derived from catalog or ledger events.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Notification {
    pub id: i32,
    pub business_id: i32,
    pub message: String,
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    pub created_at: NaiveDateTime,
    /// Set exactly once, when the notification transitions to read.
    pub read_at: Option<NaiveDateTime>,
}

/// What triggered the notification.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    LowStock,
    Milestone,
    SalesAlert,
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        match value {
            "LOWSTOCK" => Self::LowStock,
            "MILESTONE" => Self::Milestone,
            _ => Self::SalesAlert,
        }
    }
}

impl From<NotificationKind> for &'static str {
    fn from(value: NotificationKind) -> Self {
        match value {
            NotificationKind::LowStock => "LOWSTOCK",
            NotificationKind::Milestone => "MILESTONE",
            NotificationKind::SalesAlert => "SALES_ALERT",
        }
    }
}

/// Read state. The only transition is `Unread -> Read`; read is terminal.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Unread,
    Read,
}

impl From<&str> for NotificationStatus {
    fn from(value: &str) -> Self {
        match value {
            "READ" => Self::Read,
            _ => Self::Unread,
        }
    }
}

impl From<NotificationStatus> for &'static str {
    fn from(value: NotificationStatus) -> Self {
        match value {
            NotificationStatus::Unread => "UNREAD",
            NotificationStatus::Read => "READ",
        }
    }
}

/// Payload required to record a new notification. Status is always unread
/// at creation.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub business_id: i32,
    pub message: String,
    pub kind: NotificationKind,
}

impl NewNotification {
    pub fn new(business_id: i32, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            business_id,
            message: message.into(),
            kind,
        }
    }
}
