use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// Direction of an inventory movement.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Stock added: opening balance, purchase receipt or upward correction.
    In,
    /// Stock removed by a downward correction.
    Out,
    /// Stock removed by a point-of-sale checkout.
    Sale,
}

impl TransactionKind {
    /// Whether the movement reduces the on-hand quantity.
    pub fn is_outgoing(&self) -> bool {
        matches!(self, Self::Out | Self::Sale)
    }

    /// Signed quantity change for a movement of `quantity` units.
    pub fn signed(&self, quantity: i32) -> i32 {
        if self.is_outgoing() {
            quantity.saturating_neg()
        } else {
            quantity
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        match value {
            "out" => Self::Out,
            "sale" => Self::Sale,
            _ => Self::In,
        }
    }
}

impl From<TransactionKind> for &'static str {
    fn from(value: TransactionKind) -> Self {
        match value {
            TransactionKind::In => "in",
            TransactionKind::Out => "out",
            TransactionKind::Sale => "sale",
        }
    }
}

impl From<TransactionKind> for String {
    fn from(value: TransactionKind) -> Self {
        <&'static str>::from(value).to_string()
    }
}

/// Entry of the inventory transaction log.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InventoryTransaction {
    pub id: i32,
    pub location_id: i32,
    pub product_id: i32,
    /// Inventory record the movement was applied to.
    pub inventory_id: Option<i32>,
    pub kind: TransactionKind,
    /// Always positive; the direction comes from `kind`.
    pub quantity: i32,
    /// Unit price at the time of the movement.
    pub price_cents: i64,
    /// Document that caused the movement (`PO-12`, an invoice number, `SALE-3`).
    pub reference: Option<String>,
    pub sync_status: SyncStatus,
    pub created_at: NaiveDateTime,
}

/// A change to the on-hand quantity of one product.
///
/// Repositories apply the change to the product's inventory record and log it
/// as an [`InventoryTransaction`] within the same write.
#[derive(Debug, Clone, PartialEq)]
pub struct StockMovement {
    pub product_id: i32,
    pub kind: TransactionKind,
    pub quantity: i32,
    pub price_cents: i64,
    pub reference: Option<String>,
    pub created_at: NaiveDateTime,
}

impl StockMovement {
    pub fn new(product_id: i32, kind: TransactionKind, quantity: i32, price_cents: i64) -> Self {
        Self {
            product_id,
            kind,
            quantity,
            price_cents,
            reference: None,
            created_at: Local::now().naive_utc(),
        }
    }

    /// Attach the document reference that caused the movement.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Query definition used to list inventory transactions.
#[derive(Debug, Clone)]
pub struct TransactionListQuery {
    pub location_id: i32,
    /// `None` returns every kind.
    pub kind: Option<TransactionKind>,
    pub product_id: Option<i32>,
    /// Inclusive lower bound on `created_at`.
    pub from: Option<NaiveDateTime>,
    /// Inclusive upper bound on `created_at`.
    pub to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl TransactionListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            kind: None,
            product_id: None,
            from: None,
            to: None,
            pagination: None,
        }
    }

    /// Only return movements of the given kind.
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Only return movements of a single product.
    pub fn product_id(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Restrict results to movements created within `[from, to]`.
    pub fn between(mut self, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
