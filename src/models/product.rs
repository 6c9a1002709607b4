use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, UpdateProduct as DomainUpdateProduct,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub location_id: i32,
    pub category_id: Option<i32>,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub min_quantity: i32,
    pub units: Option<String>,
    pub is_archived: bool,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub location_id: i32,
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub sku: &'a str,
    pub price_cents: i64,
    pub min_quantity: i32,
    pub units: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub category_id: Option<i32>,
    pub name: &'a str,
    pub sku: &'a str,
    pub price_cents: i64,
    pub min_quantity: i32,
    pub units: Option<&'a str>,
    pub is_archived: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            category_id: value.category_id,
            name: value.name,
            sku: value.sku,
            price_cents: value.price_cents,
            min_quantity: value.min_quantity,
            units: value.units,
            is_archived: value.is_archived,
            sync_status: value.sync_status.as_str().into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            location_id: value.location_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            sku: value.sku.as_str(),
            price_cents: value.price_cents,
            min_quantity: value.min_quantity,
            units: value.units.as_deref(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateProduct> for UpdateProduct<'a> {
    fn from(value: &'a DomainUpdateProduct) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            sku: value.sku.as_str(),
            price_cents: value.price_cents,
            min_quantity: value.min_quantity,
            units: value.units.as_deref(),
            is_archived: value.is_archived,
            updated_at: value.updated_at,
        }
    }
}
