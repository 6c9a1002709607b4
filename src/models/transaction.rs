use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::transaction::{InventoryTransaction as DomainInventoryTransaction, StockMovement};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::inventory_transactions)]
pub struct InventoryTransaction {
    pub id: i32,
    pub location_id: i32,
    pub product_id: i32,
    pub inventory_id: Option<i32>,
    pub kind: String,
    pub quantity: i32,
    pub price_cents: i64,
    pub reference: Option<String>,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory_transactions)]
pub struct NewInventoryTransaction<'a> {
    pub location_id: i32,
    pub product_id: i32,
    pub inventory_id: Option<i32>,
    pub kind: &'static str,
    pub quantity: i32,
    pub price_cents: i64,
    pub reference: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl<'a> NewInventoryTransaction<'a> {
    pub fn from_movement(
        location_id: i32,
        inventory_id: Option<i32>,
        movement: &'a StockMovement,
    ) -> Self {
        Self {
            location_id,
            product_id: movement.product_id,
            inventory_id,
            kind: movement.kind.into(),
            quantity: movement.quantity,
            price_cents: movement.price_cents,
            reference: movement.reference.as_deref(),
            created_at: movement.created_at,
        }
    }
}

impl From<InventoryTransaction> for DomainInventoryTransaction {
    fn from(value: InventoryTransaction) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            product_id: value.product_id,
            inventory_id: value.inventory_id,
            kind: value.kind.as_str().into(),
            quantity: value.quantity,
            price_cents: value.price_cents,
            reference: value.reference,
            sync_status: value.sync_status.as_str().into(),
            created_at: value.created_at,
        }
    }
}
