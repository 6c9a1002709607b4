use chrono::{Local, NaiveDate, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::money::{line_cents, sum_cents};
use crate::domain::sync::SyncStatus;

/// Lifecycle states of a purchase order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// Created and waiting for approval.
    #[default]
    Requested,
    /// Approved and sent to the supplier.
    Approved,
    /// Goods arrived and were added to inventory.
    Received,
    /// Abandoned before delivery.
    Cancelled,
    /// Received and settled with the supplier.
    Paid,
}

/// Status-changing actions available on a purchase order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderAction {
    Approve,
    Receive,
    Pay,
    Cancel,
}

impl PurchaseOrderStatus {
    /// Status reached by applying `action`, or `None` when the action is not
    /// allowed from the current status.
    pub fn apply(self, action: PurchaseOrderAction) -> Option<Self> {
        use PurchaseOrderAction as A;

        match (self, action) {
            (Self::Requested, A::Approve) => Some(Self::Approved),
            (Self::Approved, A::Receive) => Some(Self::Received),
            (Self::Received, A::Pay) => Some(Self::Paid),
            (Self::Requested | Self::Approved, A::Cancel) => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Only requested orders may have their lines changed.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Requested)
    }
}

impl From<&str> for PurchaseOrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "approved" => Self::Approved,
            "received" => Self::Received,
            "cancelled" => Self::Cancelled,
            "paid" => Self::Paid,
            _ => Self::Requested,
        }
    }
}

impl From<PurchaseOrderStatus> for &'static str {
    fn from(value: PurchaseOrderStatus) -> Self {
        match value {
            PurchaseOrderStatus::Requested => "requested",
            PurchaseOrderStatus::Approved => "approved",
            PurchaseOrderStatus::Received => "received",
            PurchaseOrderStatus::Cancelled => "cancelled",
            PurchaseOrderStatus::Paid => "paid",
        }
    }
}

impl From<PurchaseOrderStatus> for String {
    fn from(value: PurchaseOrderStatus) -> Self {
        <&'static str>::from(value).to_string()
    }
}

/// Line of a purchase order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrderItem {
    pub id: i32,
    pub product_id: i32,
    /// Units ordered.
    pub quantity: i32,
    /// Units actually delivered; set when the order is received.
    pub quantity_received: i32,
    pub unit_price_cents: i64,
}

impl PurchaseOrderItem {
    pub fn line_total_cents(&self) -> i64 {
        line_cents(self.quantity, self.unit_price_cents)
    }
}

/// Order placed with a supplier.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchaseOrder {
    /// Unique identifier of the order.
    pub id: i32,
    /// Owning location identifier.
    pub location_id: i32,
    /// Supplier the order is placed with.
    pub supplier_id: i32,
    /// Current lifecycle status of the order.
    pub status: PurchaseOrderStatus,
    /// Date the supplier promised to deliver.
    pub expected_delivery: NaiveDate,
    /// Optional notes supplied by the operator.
    pub notes: Option<String>,
    /// Sum of the ordered line totals in the smallest currency unit.
    pub total_cents: i64,
    /// Ordered lines.
    pub items: Vec<PurchaseOrderItem>,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PurchaseOrder {
    /// Human-friendly reference used on transactions and printouts.
    pub fn reference(&self) -> String {
        format!("PO-{}", self.id)
    }
}

/// Line payload for new or edited purchase orders.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseOrderItem {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

/// Sum of `quantity × unit price` over the given lines.
pub fn order_total_cents(items: &[NewPurchaseOrderItem]) -> i64 {
    sum_cents(
        items
            .iter()
            .map(|item| line_cents(item.quantity, item.unit_price_cents)),
    )
}

/// Payload required to insert a new purchase order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchaseOrder {
    pub location_id: i32,
    pub supplier_id: i32,
    pub expected_delivery: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<NewPurchaseOrderItem>,
    pub updated_at: NaiveDateTime,
}

impl NewPurchaseOrder {
    pub fn new(
        location_id: i32,
        supplier_id: i32,
        expected_delivery: NaiveDate,
        items: Vec<NewPurchaseOrderItem>,
    ) -> Self {
        Self {
            location_id,
            supplier_id,
            expected_delivery,
            notes: None,
            items,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn total_cents(&self) -> i64 {
        order_total_cents(&self.items)
    }
}

/// Replacement data for an order that is still `requested`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePurchaseOrder {
    pub supplier_id: i32,
    pub expected_delivery: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<NewPurchaseOrderItem>,
    pub updated_at: NaiveDateTime,
}

impl UpdatePurchaseOrder {
    pub fn total_cents(&self) -> i64 {
        order_total_cents(&self.items)
    }
}

/// Quantity delivered for one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedItem {
    pub item_id: i32,
    pub quantity_received: i32,
}

/// Query definition used to list purchase orders.
#[derive(Debug, Clone)]
pub struct PurchaseOrderListQuery {
    pub location_id: i32,
    pub status: Option<PurchaseOrderStatus>,
    pub supplier_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl PurchaseOrderListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            status: None,
            supplier_id: None,
            pagination: None,
        }
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: PurchaseOrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter the results by supplier identifier.
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
