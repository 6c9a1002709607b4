use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// Payment terms negotiated with a supplier.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentTerms {
    #[default]
    #[serde(rename = "Net 30")]
    Net30,
    #[serde(rename = "Net 45")]
    Net45,
    #[serde(rename = "Net 60")]
    Net60,
    #[serde(rename = "Net 90")]
    Net90,
    #[serde(rename = "Due on Receipt")]
    DueOnReceipt,
    #[serde(rename = "2/10 Net 30")]
    TwoTenNet30,
    #[serde(rename = "COD")]
    CashOnDelivery,
    #[serde(rename = "Due When Consumed")]
    DueWhenConsumed,
}

impl PaymentTerms {
    pub const ALL: [PaymentTerms; 8] = [
        Self::Net30,
        Self::Net45,
        Self::Net60,
        Self::Net90,
        Self::DueOnReceipt,
        Self::TwoTenNet30,
        Self::CashOnDelivery,
        Self::DueWhenConsumed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Net30 => "Net 30",
            Self::Net45 => "Net 45",
            Self::Net60 => "Net 60",
            Self::Net90 => "Net 90",
            Self::DueOnReceipt => "Due on Receipt",
            Self::TwoTenNet30 => "2/10 Net 30",
            Self::CashOnDelivery => "COD",
            Self::DueWhenConsumed => "Due When Consumed",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|terms| terms.label().eq_ignore_ascii_case(value))
    }
}

impl From<&str> for PaymentTerms {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

/// Vendor that fills purchase orders.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Supplier {
    /// Unique identifier of the supplier.
    pub id: i32,
    /// Owning location identifier.
    pub location_id: i32,
    /// Trading name of the supplier.
    pub name: String,
    /// Person to talk to about orders.
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub payment_terms: PaymentTerms,
    /// Preferred suppliers are suggested first on new purchase orders.
    pub is_preferred: bool,
    pub is_active: bool,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Supplier fields shared by the insert and update payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierDetails {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub payment_terms: PaymentTerms,
    pub is_preferred: bool,
}

/// Payload required to insert a new supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplier {
    pub location_id: i32,
    pub details: SupplierDetails,
    pub updated_at: NaiveDateTime,
}

impl NewSupplier {
    pub fn new(location_id: i32, details: SupplierDetails) -> Self {
        Self {
            location_id,
            details,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Patch data applied when editing a supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSupplier {
    pub details: SupplierDetails,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateSupplier {
    pub fn new(details: SupplierDetails, is_active: bool) -> Self {
        Self {
            details,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list suppliers for a location.
#[derive(Debug, Clone)]
pub struct SupplierListQuery {
    pub location_id: i32,
    /// Substring matched against name, contact person and email.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl SupplierListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
