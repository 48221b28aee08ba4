use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::bill::{Bill as DomainBill, BillItem as DomainBillItem};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::bills)]
pub struct Bill {
    pub id: i32,
    pub business_id: i32,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub discount_percent: i32,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::bill_items)]
#[diesel(belongs_to(Bill, foreign_key = bill_id))]
pub struct BillItem {
    pub id: i32,
    pub bill_id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bills)]
pub struct NewBill<'a> {
    pub business_id: i32,
    pub customer_name: Option<&'a str>,
    pub customer_email: Option<&'a str>,
    pub customer_phone: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub discount_percent: i32,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bill_items)]
pub struct NewBillItem<'a> {
    pub bill_id: i32,
    pub product_id: i32,
    pub name: &'a str,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

impl Bill {
    /// Assemble a domain bill from already-converted items.
    pub fn into_domain_items(self, items: Vec<DomainBillItem>) -> DomainBill {
        DomainBill {
            id: self.id,
            business_id: self.business_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            notes: self.notes,
            discount_percent: self.discount_percent,
            total_cents: self.total_cents,
            items,
            created_at: self.created_at,
        }
    }

    pub fn into_domain(self, items: Vec<BillItem>) -> DomainBill {
        DomainBill {
            id: self.id,
            business_id: self.business_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            notes: self.notes,
            discount_percent: self.discount_percent,
            total_cents: self.total_cents,
            items: items.into_iter().map(BillItem::into_domain).collect(),
            created_at: self.created_at,
        }
    }
}

impl BillItem {
    pub fn into_domain(self) -> DomainBillItem {
        DomainBillItem {
            product_id: self.product_id,
            name: self.name,
            quantity: self.quantity,
            unit_price_cents: self.unit_price_cents,
            subtotal_cents: self.subtotal_cents,
        }
    }
}

impl From<(Bill, Vec<BillItem>)> for DomainBill {
    fn from(value: (Bill, Vec<BillItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}
