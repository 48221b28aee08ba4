use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A tenant. Every product, bill, sale and notification belongs to exactly
/// one business, and a business to exactly one owning user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Business {
    pub id: i32,
    /// Internal id of the owning user.
    pub owner_id: i32,
    pub name: String,
    /// Optional image reference managed by the presentation layer.
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload required to create a business for an owner.
#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub owner_id: i32,
    pub name: String,
    pub image: Option<String>,
}

impl NewBusiness {
    pub fn new(owner_id: i32, name: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
