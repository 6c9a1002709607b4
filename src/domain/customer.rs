use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// Domain representation of a customer known to a location.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Customer {
    /// Unique identifier of the customer.
    pub id: i32,
    /// Owning location identifier.
    pub location_id: i32,
    /// Customer's display name.
    pub name: String,
    /// Optional email used for receipts.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Inactive customers cannot be attached to new sales.
    pub is_active: bool,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    /// Timestamp for when the customer record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the customer record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new customer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub location_id: i32,
    pub name: String,
    /// Lower-cased email, if any.
    pub email: Option<String>,
    pub phone: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewCustomer {
    pub fn new(location_id: i32, name: impl Into<String>) -> Self {
        Self {
            location_id,
            name: name.into(),
            email: None,
            phone: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach an email; it is stored lower-cased.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into().to_lowercase());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Patch data applied when editing a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list customers for a location.
#[derive(Debug, Clone)]
pub struct CustomerListQuery {
    pub location_id: i32,
    /// Substring matched against name, email and phone.
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
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
