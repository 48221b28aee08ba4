use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::business::{Business as DomainBusiness, NewBusiness as DomainNewBusiness};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::businesses)]
pub struct Business {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::businesses)]
pub struct NewBusiness<'a> {
    pub owner_id: i32,
    pub name: &'a str,
    pub image: Option<&'a str>,
}

impl From<Business> for DomainBusiness {
    fn from(value: Business) -> Self {
        Self {
            id: value.id,
            owner_id: value.owner_id,
            name: value.name,
            image: value.image,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewBusiness> for NewBusiness<'a> {
    fn from(value: &'a DomainNewBusiness) -> Self {
        Self {
            owner_id: value.owner_id,
            name: value.name.as_str(),
            image: value.image.as_deref(),
        }
    }
}
