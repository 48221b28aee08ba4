use serde::Deserialize;
use validator::Validate;

/// Maximum allowed length for a business name.
const NAME_MAX_LEN: u64 = 128;

/// Payload for creating a business.
#[derive(Debug, Deserialize, Validate)]
pub struct AddBusinessForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Optional image reference stored verbatim.
    pub image: Option<String>,
}
