use serde::Deserialize;
use validator::Validate;

use crate::domain::notification::NotificationKind;

/// Payload for recording a notification by hand (milestones, sales
/// alerts). Low-stock notifications are emitted by the billing flow.
#[derive(Debug, Deserialize, Validate)]
pub struct AddNotificationForm {
    #[validate(length(min = 1))]
    pub message: String,
    pub kind: NotificationKind,
}
