use serde::Deserialize;
use validator::Validate;

use crate::domain::product::UpdateProduct;

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// Payload for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Price in cents; negative prices are rejected.
    #[validate(range(min = 0))]
    pub price_cents: i64,
    /// Initial stock level.
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(range(min = 0))]
    pub low_stock_threshold: i32,
    pub image: Option<String>,
}

/// Partial-update payload. Absent fields leave the product unchanged;
/// stock is deliberately not updatable here (see stock adjustments).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,
    #[validate(range(min = 0))]
    pub low_stock_threshold: Option<i32>,
    pub image: Option<String>,
}

impl UpdateProductForm {
    /// Translate the set fields into an explicit update patch.
    pub fn into_update(self) -> UpdateProduct {
        let mut updates = UpdateProduct::new();

        if let Some(name) = self.name {
            updates = updates.name(name);
        }
        if let Some(price_cents) = self.price_cents {
            updates = updates.price_cents(price_cents);
        }
        if let Some(threshold) = self.low_stock_threshold {
            updates = updates.low_stock_threshold(threshold);
        }
        if let Some(image) = self.image {
            updates = updates.image(Some(image));
        }

        updates
    }
}

/// Payload for relative stock adjustments. Positive deltas restock,
/// negative deltas consume.
#[derive(Debug, Deserialize)]
pub struct AdjustStockForm {
    pub delta: i32,
}
