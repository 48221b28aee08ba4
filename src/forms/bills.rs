use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::bill::{BillItemRequest, NewBill};

/// One requested cart line. Serialize is required by the nested list
/// validation on [`CreateBillForm`].
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct BillItemForm {
    pub product_id: i32,
    /// Units requested; zero-quantity lines are meaningless.
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Payload for creating a bill from a cart.
///
/// Note what is absent: per-item prices. Unit prices are always derived
/// from the catalog at billing time, never trusted from the caller.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateBillForm {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub items: Vec<BillItemForm>,
    /// Bill-level discount in whole percents.
    #[validate(range(min = 0, max = 100))]
    pub discount_percent: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
}

impl CreateBillForm {
    /// Build the repository payload, preserving the input line order.
    pub fn into_new_bill(self, business_id: i32) -> NewBill {
        let items = self
            .items
            .iter()
            .map(|item| BillItemRequest {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        let mut new_bill =
            NewBill::new(business_id, items).discount_percent(self.discount_percent.unwrap_or(0));

        if let Some(name) = self.customer_name.filter(|value| !value.trim().is_empty()) {
            new_bill = new_bill.customer_name(name);
        }
        if let Some(email) = self.customer_email.filter(|value| !value.trim().is_empty()) {
            new_bill = new_bill.customer_email(email);
        }
        if let Some(phone) = self.customer_phone.filter(|value| !value.trim().is_empty()) {
            new_bill = new_bill.customer_phone(phone);
        }
        if let Some(notes) = self.notes.filter(|value| !value.trim().is_empty()) {
            new_bill = new_bill.notes(notes);
        }

        new_bill
    }
}
