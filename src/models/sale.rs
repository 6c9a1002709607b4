use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::sale::{
    NewSale as DomainNewSale, NewSaleItem as DomainNewSaleItem, Sale as DomainSale,
    SaleItem as DomainSaleItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sales)]
pub struct Sale {
    pub id: i32,
    pub location_id: i32,
    pub customer_id: Option<i32>,
    pub payment_method: String,
    pub total_cents: i64,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::sale_items)]
#[diesel(belongs_to(Sale, foreign_key = sale_id))]
pub struct SaleItem {
    pub id: i32,
    pub sale_id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sales)]
pub struct NewSale {
    pub location_id: i32,
    pub customer_id: Option<i32>,
    pub payment_method: &'static str,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sale_items)]
pub struct NewSaleItem<'a> {
    pub sale_id: i32,
    pub product_id: i32,
    pub name: &'a str,
    pub quantity: i32,
    pub price_cents: i64,
}

impl Sale {
    pub fn into_domain(self, items: Vec<SaleItem>) -> DomainSale {
        DomainSale {
            id: self.id,
            location_id: self.location_id,
            customer_id: self.customer_id,
            payment_method: self.payment_method.as_str().into(),
            total_cents: self.total_cents,
            items: items.into_iter().map(SaleItem::into_domain).collect(),
            sync_status: self.sync_status.as_str().into(),
            created_at: self.created_at,
        }
    }
}

impl SaleItem {
    pub fn into_domain(self) -> DomainSaleItem {
        DomainSaleItem {
            id: self.id,
            product_id: self.product_id,
            name: self.name,
            quantity: self.quantity,
            price_cents: self.price_cents,
        }
    }
}

impl From<(Sale, Vec<SaleItem>)> for DomainSale {
    fn from(value: (Sale, Vec<SaleItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl From<&DomainNewSale> for NewSale {
    fn from(value: &DomainNewSale) -> Self {
        Self {
            location_id: value.location_id,
            customer_id: value.customer_id,
            payment_method: value.payment_method.into(),
            total_cents: value.total_cents(),
            created_at: value.created_at,
        }
    }
}

impl<'a> NewSaleItem<'a> {
    pub fn from_domain(sale_id: i32, value: &'a DomainNewSaleItem) -> Self {
        Self {
            sale_id,
            product_id: value.product_id,
            name: value.name.as_str(),
            quantity: value.quantity,
            price_cents: value.price_cents,
        }
    }
}
