use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::purchase_order::{
    NewPurchaseOrder as DomainNewPurchaseOrder, NewPurchaseOrderItem as DomainNewPurchaseOrderItem,
    PurchaseOrder as DomainPurchaseOrder, PurchaseOrderItem as DomainPurchaseOrderItem,
    PurchaseOrderStatus, UpdatePurchaseOrder as DomainUpdatePurchaseOrder,
};
use crate::domain::sync::SyncStatus;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::purchase_orders)]
pub struct PurchaseOrder {
    pub id: i32,
    pub location_id: i32,
    pub supplier_id: i32,
    pub status: String,
    pub expected_delivery: NaiveDate,
    pub notes: Option<String>,
    pub total_cents: i64,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::purchase_order_items)]
#[diesel(belongs_to(PurchaseOrder, foreign_key = purchase_order_id))]
pub struct PurchaseOrderItem {
    pub id: i32,
    pub purchase_order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub quantity_received: i32,
    pub unit_price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::purchase_orders)]
pub struct NewPurchaseOrder<'a> {
    pub location_id: i32,
    pub supplier_id: i32,
    pub status: &'static str,
    pub expected_delivery: NaiveDate,
    pub notes: Option<&'a str>,
    pub total_cents: i64,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::purchase_order_items)]
pub struct NewPurchaseOrderItem {
    pub purchase_order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::purchase_orders)]
#[diesel(treat_none_as_null = true)]
pub struct UpdatePurchaseOrder<'a> {
    pub supplier_id: i32,
    pub expected_delivery: NaiveDate,
    pub notes: Option<&'a str>,
    pub total_cents: i64,
    pub sync_status: &'static str,
    pub updated_at: NaiveDateTime,
}

/// Status change written by the approve, receive, pay and cancel actions.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::purchase_orders)]
pub struct UpdatePurchaseOrderStatus {
    pub status: &'static str,
    pub sync_status: &'static str,
    pub updated_at: NaiveDateTime,
}

impl PurchaseOrder {
    pub fn into_domain(self, items: Vec<PurchaseOrderItem>) -> DomainPurchaseOrder {
        DomainPurchaseOrder {
            id: self.id,
            location_id: self.location_id,
            supplier_id: self.supplier_id,
            status: self.status.as_str().into(),
            expected_delivery: self.expected_delivery,
            notes: self.notes,
            total_cents: self.total_cents,
            items: items
                .into_iter()
                .map(PurchaseOrderItem::into_domain)
                .collect(),
            sync_status: self.sync_status.as_str().into(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PurchaseOrderItem {
    pub fn into_domain(self) -> DomainPurchaseOrderItem {
        DomainPurchaseOrderItem {
            id: self.id,
            product_id: self.product_id,
            quantity: self.quantity,
            quantity_received: self.quantity_received,
            unit_price_cents: self.unit_price_cents,
        }
    }
}

impl From<(PurchaseOrder, Vec<PurchaseOrderItem>)> for DomainPurchaseOrder {
    fn from(value: (PurchaseOrder, Vec<PurchaseOrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewPurchaseOrder> for NewPurchaseOrder<'a> {
    fn from(value: &'a DomainNewPurchaseOrder) -> Self {
        Self {
            location_id: value.location_id,
            supplier_id: value.supplier_id,
            status: PurchaseOrderStatus::Requested.into(),
            expected_delivery: value.expected_delivery,
            notes: value.notes.as_deref(),
            total_cents: value.total_cents(),
            updated_at: value.updated_at,
        }
    }
}

impl NewPurchaseOrderItem {
    pub fn from_domain(purchase_order_id: i32, value: &DomainNewPurchaseOrderItem) -> Self {
        Self {
            purchase_order_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}

impl<'a> From<&'a DomainUpdatePurchaseOrder> for UpdatePurchaseOrder<'a> {
    fn from(value: &'a DomainUpdatePurchaseOrder) -> Self {
        Self {
            supplier_id: value.supplier_id,
            expected_delivery: value.expected_delivery,
            notes: value.notes.as_deref(),
            total_cents: value.total_cents(),
            sync_status: SyncStatus::Pending.into(),
            updated_at: value.updated_at,
        }
    }
}
