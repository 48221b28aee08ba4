use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One fulfilled line item, appended to the ledger when a bill commits.
/// Never mutated or deleted afterwards; analytics reads are built on it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Sale {
    pub id: i32,
    pub business_id: i32,
    /// The product sold. Kept as a bare id so the ledger outlives the
    /// product; name resolution happens at report time.
    pub product_id: i32,
    pub quantity: i32,
    pub total_price_cents: i64,
    pub sold_at: NaiveDateTime,
}

/// Query definition used to read a time window of the ledger.
#[derive(Debug, Clone)]
pub struct SaleListQuery {
    pub business_id: i32,
    /// Inclusive lower bound on `sold_at`.
    pub from: Option<NaiveDateTime>,
    /// Inclusive upper bound on `sold_at`.
    pub to: Option<NaiveDateTime>,
}

impl SaleListQuery {
    /// Construct a query covering the business's entire ledger.
    pub fn new(business_id: i32) -> Self {
        Self {
            business_id,
            from: None,
            to: None,
        }
    }

    pub fn from(mut self, from: NaiveDateTime) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: NaiveDateTime) -> Self {
        self.to = Some(to);
        self
    }
}
