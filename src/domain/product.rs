use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Catalog entry owned by a business: authoritative price and stock level.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning business identifier.
    pub business_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Price in the smallest currency unit (cents).
    pub price_cents: i64,
    /// Units currently on hand. Never negative.
    pub stock: i32,
    /// Stock level at or below which the product counts as low-stock.
    pub low_stock_threshold: i32,
    /// Globally unique scan token assigned at creation.
    pub barcode: String,
    /// Optional image reference.
    pub image: Option<String>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Whether the current stock level is at or below the configured
    /// low-stock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

/// Payload required to insert a new product for a business.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub business_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub stock: i32,
    pub low_stock_threshold: i32,
    /// Scan token; callers obtain one from the catalog service, which
    /// guarantees global uniqueness.
    pub barcode: String,
    pub image: Option<String>,
}

impl NewProduct {
    pub fn new(
        business_id: i32,
        name: impl Into<String>,
        price_cents: i64,
        stock: i32,
        low_stock_threshold: i32,
        barcode: impl Into<String>,
    ) -> Self {
        Self {
            business_id,
            name: name.into(),
            price_cents,
            stock,
            low_stock_threshold,
            barcode: barcode.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Patch applied when updating an existing product. Only fields explicitly
/// set through the builder are written; stock is deliberately absent, it
/// moves exclusively through relative adjustments.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub low_stock_threshold: Option<i32>,
    pub image: Option<Option<String>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    pub fn new() -> Self {
        Self {
            name: None,
            price_cents: None,
            low_stock_threshold: None,
            image: None,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the product price.
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Update the low-stock threshold.
    pub fn low_stock_threshold(mut self, threshold: i32) -> Self {
        self.low_stock_threshold = Some(threshold);
        self
    }

    /// Update the image reference, using `None` to clear an existing value.
    pub fn image(mut self, image: Option<impl Into<String>>) -> Self {
        self.image = Some(image.map(|value| value.into()));
        self
    }

    /// Whether the patch carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price_cents.is_none()
            && self.low_stock_threshold.is_none()
            && self.image.is_none()
    }
}

/// Query definition used to list products for a business.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    pub business_id: i32,
    /// Optional case-insensitive substring applied to name or barcode.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `business_id`.
    pub fn new(business_id: i32) -> Self {
        Self {
            business_id,
            search: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the name or barcode.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
