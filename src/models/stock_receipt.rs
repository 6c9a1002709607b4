use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::stock_receipt::{
    NewStockReceipt as DomainNewStockReceipt, NewStockReceiptItem as DomainNewStockReceiptItem,
    StockReceipt as DomainStockReceipt, StockReceiptItem as DomainStockReceiptItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::stock_receipts)]
pub struct StockReceipt {
    pub id: i32,
    pub location_id: i32,
    pub supplier_id: i32,
    pub invoice_number: String,
    pub notes: Option<String>,
    pub total_cents: i64,
    pub received_on: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::stock_receipt_items)]
#[diesel(belongs_to(StockReceipt, foreign_key = stock_receipt_id))]
pub struct StockReceiptItem {
    pub id: i32,
    pub stock_receipt_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stock_receipts)]
pub struct NewStockReceipt<'a> {
    pub location_id: i32,
    pub supplier_id: i32,
    pub invoice_number: &'a str,
    pub notes: Option<&'a str>,
    pub total_cents: i64,
    pub received_on: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::stock_receipt_items)]
pub struct NewStockReceiptItem {
    pub stock_receipt_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}

impl StockReceipt {
    pub fn into_domain(self, items: Vec<StockReceiptItem>) -> DomainStockReceipt {
        DomainStockReceipt {
            id: self.id,
            location_id: self.location_id,
            supplier_id: self.supplier_id,
            invoice_number: self.invoice_number,
            notes: self.notes,
            total_cents: self.total_cents,
            received_on: self.received_on,
            items: items
                .into_iter()
                .map(|item| DomainStockReceiptItem {
                    id: item.id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                    subtotal_cents: item.subtotal_cents,
                })
                .collect(),
            created_at: self.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewStockReceipt> for NewStockReceipt<'a> {
    fn from(value: &'a DomainNewStockReceipt) -> Self {
        Self {
            location_id: value.location_id,
            supplier_id: value.supplier_id,
            invoice_number: value.invoice_number.as_str(),
            notes: value.notes.as_deref(),
            total_cents: value.total_cents(),
            received_on: value.received_on,
            created_at: value.created_at,
        }
    }
}

impl NewStockReceiptItem {
    pub fn from_domain(stock_receipt_id: i32, value: &DomainNewStockReceiptItem) -> Self {
        Self {
            stock_receipt_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
            subtotal_cents: value.subtotal_cents(),
        }
    }
}
