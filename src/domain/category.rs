use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// Domain representation of a product category belonging to a location.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning location identifier.
    pub location_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Inactive categories are hidden from product forms.
    pub is_active: bool,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a location.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning location identifier.
    pub location_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the supplied details and current timestamp.
    pub fn new(location_id: i32, name: impl Into<String>) -> Self {
        Self {
            location_id,
            name: name.into(),
            description: None,
            updated_at: Local::now().naive_utc(),
        }
    }

    /// Attach a descriptive text to the category payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Patch data applied when updating an existing category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    /// Updated name for the category.
    pub name: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    /// Whether the category stays selectable.
    pub is_active: bool,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    /// Build a category update payload with the supplied values.
    pub fn new(name: String, description: Option<String>, is_active: bool) -> Self {
        Self {
            name,
            description,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list categories for a location.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    /// Owning location identifier.
    pub location_id: i32,
    /// Whether inactive categories should be included in the results.
    pub include_inactive: bool,
    /// Optional substring search applied to category names.
    pub search: Option<String>,
    /// Optional pagination options.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            include_inactive: false,
            search: None,
            pagination: None,
        }
    }

    /// Include inactive categories in the results.
    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    /// Filter categories by a case-insensitive substring.
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
