use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub business_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub stock: i32,
    pub low_stock_threshold: i32,
    pub barcode: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub business_id: i32,
    pub name: &'a str,
    pub price_cents: i64,
    pub stock: i32,
    pub low_stock_threshold: i32,
    pub barcode: &'a str,
    pub image: Option<&'a str>,
}

/// Partial update; `None` fields are left untouched by diesel.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct<'a> {
    pub name: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub low_stock_threshold: Option<i32>,
    pub image: Option<Option<&'a str>>,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            business_id: value.business_id,
            name: value.name,
            price_cents: value.price_cents,
            stock: value.stock,
            low_stock_threshold: value.low_stock_threshold,
            barcode: value.barcode,
            image: value.image,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            business_id: value.business_id,
            name: value.name.as_str(),
            price_cents: value.price_cents,
            stock: value.stock,
            low_stock_threshold: value.low_stock_threshold,
            barcode: value.barcode.as_str(),
            image: value.image.as_deref(),
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            name: value.name.as_deref(),
            price_cents: value.price_cents,
            low_stock_threshold: value.low_stock_threshold,
            image: value
                .image
                .as_ref()
                .map(|image| image.as_ref().map(String::as_str)),
            updated_at: value.updated_at,
        }
    }
}
