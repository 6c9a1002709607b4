use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// On-hand stock of one product at one location.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InventoryRecord {
    /// Unique identifier of the inventory record.
    pub id: i32,
    /// Owning location identifier.
    pub location_id: i32,
    /// Product the stock belongs to.
    pub product_id: i32,
    /// Units currently on hand.
    pub quantity: i32,
    /// Reorder threshold; at or below it the item counts as low stock.
    pub min_quantity: i32,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    /// Timestamp for when the record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last quantity change.
    pub updated_at: NaiveDateTime,
}

impl InventoryRecord {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

/// Inventory record enriched with product details for display.
#[derive(Debug, Serialize, Clone)]
pub struct InventoryItem {
    #[serde(flatten)]
    pub record: InventoryRecord,
    pub product_name: String,
    pub sku: String,
    pub is_low_stock: bool,
}

impl InventoryItem {
    pub fn new(record: InventoryRecord, product_name: String, sku: String) -> Self {
        let is_low_stock = record.is_low_stock();
        Self {
            record,
            product_name,
            sku,
            is_low_stock,
        }
    }
}

/// Payload required to start tracking a product at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInventoryRecord {
    pub location_id: i32,
    pub product_id: i32,
    /// Opening balance, logged as an incoming transaction when positive.
    pub quantity: i32,
    pub min_quantity: i32,
    pub updated_at: NaiveDateTime,
}

impl NewInventoryRecord {
    pub fn new(location_id: i32, product_id: i32, quantity: i32, min_quantity: i32) -> Self {
        Self {
            location_id,
            product_id,
            quantity,
            min_quantity,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Patch data applied when correcting an inventory record.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInventoryRecord {
    /// New on-hand quantity; the difference is logged as a transaction.
    pub quantity: i32,
    pub min_quantity: i32,
    pub updated_at: NaiveDateTime,
}

impl UpdateInventoryRecord {
    pub fn new(quantity: i32, min_quantity: i32) -> Self {
        Self {
            quantity,
            min_quantity,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list inventory records for a location.
#[derive(Debug, Clone)]
pub struct InventoryListQuery {
    pub location_id: i32,
    /// Only return records at or below their reorder threshold.
    pub low_stock_only: bool,
    pub pagination: Option<Pagination>,
}

impl InventoryListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            low_stock_only: false,
            pagination: None,
        }
    }

    pub fn low_stock_only(mut self) -> Self {
        self.low_stock_only = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
