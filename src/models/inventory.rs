use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::inventory::{
    InventoryRecord as DomainInventoryRecord, NewInventoryRecord as DomainNewInventoryRecord,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::inventory_records)]
pub struct InventoryRecord {
    pub id: i32,
    pub location_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub min_quantity: i32,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::inventory_records)]
pub struct NewInventoryRecord {
    pub location_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub min_quantity: i32,
    pub updated_at: NaiveDateTime,
}

/// Quantity change written back to an inventory record.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::inventory_records)]
pub struct UpdateInventoryRecord {
    pub quantity: i32,
    pub min_quantity: Option<i32>,
    pub sync_status: &'static str,
    pub updated_at: NaiveDateTime,
}

impl From<InventoryRecord> for DomainInventoryRecord {
    fn from(value: InventoryRecord) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            product_id: value.product_id,
            quantity: value.quantity,
            min_quantity: value.min_quantity,
            sync_status: value.sync_status.as_str().into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<&DomainNewInventoryRecord> for NewInventoryRecord {
    fn from(value: &DomainNewInventoryRecord) -> Self {
        Self {
            location_id: value.location_id,
            product_id: value.product_id,
            quantity: value.quantity,
            min_quantity: value.min_quantity,
            updated_at: value.updated_at,
        }
    }
}
