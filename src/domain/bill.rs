use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::pagination::Pagination;

/// An immutable point-of-sale receipt. There is no update operation by
/// design; corrections are new bills.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Bill {
    pub id: i32,
    pub business_id: i32,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    /// Bill-level discount, whole percents in `[0, 100]`.
    pub discount_percent: i32,
    /// Final amount in cents, after discount.
    pub total_cents: i64,
    /// Line items in the order they were requested.
    pub items: Vec<BillItem>,
    pub created_at: NaiveDateTime,
}

/// A priced line on a bill. `unit_price_cents` and `name` are snapshots
/// taken at billing time; later catalog changes never alter them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BillItem {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

/// One requested line of a cart before pricing.
#[derive(Debug, Clone, Copy)]
pub struct BillItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

/// Payload handed to the repository to price and persist a bill.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub business_id: i32,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub discount_percent: i32,
    pub items: Vec<BillItemRequest>,
}

impl NewBill {
    pub fn new(business_id: i32, items: Vec<BillItemRequest>) -> Self {
        Self {
            business_id,
            customer_name: None,
            customer_email: None,
            customer_phone: None,
            notes: None,
            discount_percent: 0,
            items,
        }
    }

    pub fn discount_percent(mut self, discount_percent: i32) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn customer_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Why a requested line was excluded from the committed bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillItemErrorReason {
    /// No product with that id belongs to the billed business.
    NotFound,
    /// The conditional stock decrement would have gone negative.
    InsufficientStock,
}

/// Per-line failure collected while billing. Failures are localized: they
/// never abort sibling lines.
#[derive(Debug, Clone, Serialize)]
pub struct BillItemError {
    pub product_id: i32,
    pub reason: BillItemErrorReason,
}

/// Result of persisting a bill: the committed receipt, the lines that were
/// dropped, and the products whose stock fell to or below their threshold.
///
/// `bill` is `None` when every requested line failed; nothing is persisted
/// in that case but the per-line errors are still reported.
#[derive(Debug, Clone)]
pub struct BillOutcome {
    pub bill: Option<Bill>,
    pub errors: Vec<BillItemError>,
    pub low_stock: Vec<Product>,
}

/// Query definition used to list bills for a business.
#[derive(Debug, Clone)]
pub struct BillListQuery {
    pub business_id: i32,
    pub pagination: Option<Pagination>,
}

impl BillListQuery {
    pub fn new(business_id: i32) -> Self {
        Self {
            business_id,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Apply a whole-percent discount to an amount in cents, rounding half up.
pub fn apply_discount(total_cents: i64, discount_percent: i32) -> i64 {
    if discount_percent <= 0 {
        return total_cents;
    }
    (total_cents * (100 - i64::from(discount_percent)) + 50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_discount_zero_is_identity() {
        assert_eq!(apply_discount(3000, 0), 3000);
    }

    #[test]
    fn apply_discount_exact() {
        // $30.00 minus 10% is $27.00.
        assert_eq!(apply_discount(3000, 10), 2700);
    }

    #[test]
    fn apply_discount_rounds_half_up() {
        // 999 * 0.85 = 849.15 -> 849; 999 * 0.95 = 949.05 -> 949;
        // 50 * 0.99 = 49.5 -> 50.
        assert_eq!(apply_discount(999, 15), 849);
        assert_eq!(apply_discount(999, 5), 949);
        assert_eq!(apply_discount(50, 1), 50);
    }

    #[test]
    fn apply_discount_full() {
        assert_eq!(apply_discount(1234, 100), 0);
    }
}
