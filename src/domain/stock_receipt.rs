use chrono::{Local, NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::money::{line_cents, sum_cents};

/// Line of a supplier delivery.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StockReceiptItem {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    /// `quantity × unit_price_cents`, fixed at the time of receipt.
    pub subtotal_cents: i64,
}

/// Goods received from a supplier outside of a purchase order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StockReceipt {
    pub id: i32,
    pub location_id: i32,
    pub supplier_id: i32,
    /// Supplier's invoice number; used as the transaction reference.
    pub invoice_number: String,
    pub notes: Option<String>,
    pub total_cents: i64,
    pub received_on: NaiveDate,
    pub items: Vec<StockReceiptItem>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStockReceiptItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl NewStockReceiptItem {
    pub fn subtotal_cents(&self) -> i64 {
        line_cents(self.quantity, self.unit_price_cents)
    }
}

/// Payload required to record a delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStockReceipt {
    pub location_id: i32,
    pub supplier_id: i32,
    pub invoice_number: String,
    pub notes: Option<String>,
    pub received_on: NaiveDate,
    pub items: Vec<NewStockReceiptItem>,
    pub created_at: NaiveDateTime,
}

impl NewStockReceipt {
    pub fn new(
        location_id: i32,
        supplier_id: i32,
        invoice_number: impl Into<String>,
        received_on: NaiveDate,
        items: Vec<NewStockReceiptItem>,
    ) -> Self {
        Self {
            location_id,
            supplier_id,
            invoice_number: invoice_number.into(),
            notes: None,
            received_on,
            items,
            created_at: Local::now().naive_utc(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn total_cents(&self) -> i64 {
        sum_cents(self.items.iter().map(NewStockReceiptItem::subtotal_cents))
    }
}

#[derive(Debug, Clone)]
pub struct StockReceiptListQuery {
    pub location_id: i32,
    pub supplier_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl StockReceiptListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            supplier_id: None,
            pagination: None,
        }
    }

    pub fn supplier_id(mut self, supplier_id: i32) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
