use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale::Sale as DomainSale;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sales)]
pub struct Sale {
    pub id: i32,
    pub business_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total_price_cents: i64,
    pub sold_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sales)]
pub struct NewSale {
    pub business_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total_price_cents: i64,
    pub sold_at: NaiveDateTime,
}

impl From<Sale> for DomainSale {
    fn from(value: Sale) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            product_id: value.product_id,
            quantity: value.quantity,
            total_price_cents: value.total_price_cents,
            sold_at: value.sold_at,
        }
    }
}
