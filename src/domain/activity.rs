use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::station::Station;
use crate::domain::sync::SyncStatus;

/// Kind of user action recorded in the activity log.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    ProductAdded,
    ProductEdited,
    ProductsImported,
    CustomerAdded,
    CustomerEdited,
    SupplierAdded,
    SupplierEdited,
    PurchaseOrderAdded,
    PurchaseOrderEdited,
    PurchaseOrderApproved,
    PurchaseOrderReceived,
    PurchaseOrderPaid,
    PurchaseOrderCancelled,
    MenuAdded,
    MenuEdited,
    MenuCategoryAdded,
    /// Stored value not recognised by this build.
    Unknown,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProductAdded => "product_added",
            Self::ProductEdited => "product_edited",
            Self::ProductsImported => "products_imported",
            Self::CustomerAdded => "customer_added",
            Self::CustomerEdited => "customer_edited",
            Self::SupplierAdded => "supplier_added",
            Self::SupplierEdited => "supplier_edited",
            Self::PurchaseOrderAdded => "purchase_order_added",
            Self::PurchaseOrderEdited => "purchase_order_edited",
            Self::PurchaseOrderApproved => "purchase_order_approved",
            Self::PurchaseOrderReceived => "purchase_order_received",
            Self::PurchaseOrderPaid => "purchase_order_paid",
            Self::PurchaseOrderCancelled => "purchase_order_cancelled",
            Self::MenuAdded => "menu_added",
            Self::MenuEdited => "menu_edited",
            Self::MenuCategoryAdded => "menu_category_added",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for ActivityAction {
    fn from(value: &str) -> Self {
        match value {
            "product_added" => Self::ProductAdded,
            "product_edited" => Self::ProductEdited,
            "products_imported" => Self::ProductsImported,
            "customer_added" => Self::CustomerAdded,
            "customer_edited" => Self::CustomerEdited,
            "supplier_added" => Self::SupplierAdded,
            "supplier_edited" => Self::SupplierEdited,
            "purchase_order_added" => Self::PurchaseOrderAdded,
            "purchase_order_edited" => Self::PurchaseOrderEdited,
            "purchase_order_approved" => Self::PurchaseOrderApproved,
            "purchase_order_received" => Self::PurchaseOrderReceived,
            "purchase_order_paid" => Self::PurchaseOrderPaid,
            "purchase_order_cancelled" => Self::PurchaseOrderCancelled,
            "menu_added" => Self::MenuAdded,
            "menu_edited" => Self::MenuEdited,
            "menu_category_added" => Self::MenuCategoryAdded,
            _ => Self::Unknown,
        }
    }
}

/// Entry of the activity log.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Activity {
    pub id: i32,
    pub location_id: i32,
    pub action: ActivityAction,
    /// Identifier of the record the action was applied to.
    pub subject_id: Option<i32>,
    pub actioned_by: String,
    pub sync_status: SyncStatus,
    pub created_at: NaiveDateTime,
}

/// Payload appended to the activity log together with the record it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub location_id: i32,
    pub action: ActivityAction,
    /// Set by the repository when the subject is created in the same write.
    pub subject_id: Option<i32>,
    pub actioned_by: String,
    pub created_at: NaiveDateTime,
}

impl NewActivity {
    /// Build an activity attributed to the station's operator.
    pub fn new(station: &Station, action: ActivityAction) -> Self {
        Self {
            location_id: station.location_id,
            action,
            subject_id: None,
            actioned_by: station.operator.clone(),
            created_at: Local::now().naive_utc(),
        }
    }

    /// Attach the identifier of an existing record.
    pub fn with_subject(mut self, subject_id: i32) -> Self {
        self.subject_id = Some(subject_id);
        self
    }
}

/// Query definition used to page through the activity log.
#[derive(Debug, Clone)]
pub struct ActivityListQuery {
    pub location_id: i32,
    pub pagination: Option<Pagination>,
}

impl ActivityListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            pagination: None,
        }
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
