use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// Physical store or warehouse that owns inventory.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Location {
    /// Unique identifier of the location.
    pub id: i32,
    /// Display name of the location.
    pub name: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Inactive locations are kept for history only.
    pub is_active: bool,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    /// Timestamp for when the location record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the location record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new location.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub email: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl NewLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a contact email to the location payload.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Patch data applied when updating an existing location.
#[derive(Debug, Clone)]
pub struct UpdateLocation {
    pub name: String,
    /// New email value; `None` clears the email.
    pub email: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateLocation {
    pub fn new(name: String, email: Option<String>, is_active: bool) -> Self {
        Self {
            name,
            email,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}
