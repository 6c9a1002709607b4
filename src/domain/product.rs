use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::sync::SyncStatus;

/// Domain representation of a sellable product.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning location identifier.
    pub location_id: i32,
    /// Optional category the product is filed under.
    pub category_id: Option<i32>,
    /// Human-readable name of the product.
    pub name: String,
    /// Stock keeping unit, unique within a location.
    pub sku: String,
    /// Selling price represented in the smallest currency unit.
    pub price_cents: i64,
    /// Default reorder threshold used for new inventory records.
    pub min_quantity: i32,
    /// Optional unit of measure (kg, pcs, ...).
    pub units: Option<String>,
    /// Flag indicating whether the product has been archived.
    pub is_archived: bool,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Owning location identifier.
    pub location_id: i32,
    /// Optional category the product is filed under.
    pub category_id: Option<i32>,
    /// Human-readable name of the product.
    pub name: String,
    /// Stock keeping unit, unique within a location.
    pub sku: String,
    /// Selling price represented in the smallest currency unit.
    pub price_cents: i64,
    /// Default reorder threshold.
    pub min_quantity: i32,
    /// Optional unit of measure.
    pub units: Option<String>,
    /// Timestamp captured when the product payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(
        location_id: i32,
        name: impl Into<String>,
        sku: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            location_id,
            category_id: None,
            name: name.into(),
            sku: sku.into(),
            price_cents,
            min_quantity: 0,
            units: None,
            updated_at: now,
        }
    }

    /// File the product under a category.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the default reorder threshold.
    pub fn with_min_quantity(mut self, min_quantity: i32) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    /// Attach a unit of measure to the product payload.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProduct {
    pub category_id: Option<i32>,
    pub name: String,
    pub sku: String,
    pub price_cents: i64,
    pub min_quantity: i32,
    pub units: Option<String>,
    pub is_archived: bool,
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list products for a location.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning location identifier.
    pub location_id: i32,
    /// Optional search term matched against name and SKU.
    pub search: Option<String>,
    /// Restrict results to the given identifiers.
    pub ids: Option<Vec<i32>>,
    /// Whether archived products should be part of the result set.
    pub include_archived: bool,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `location_id`.
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            search: None,
            ids: None,
            include_archived: false,
            pagination: None,
        }
    }

    /// Filter products using a search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Only return products with the given identifiers.
    pub fn ids(mut self, ids: Vec<i32>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Include archived products in the results.
    pub fn include_archived(mut self) -> Self {
        self.include_archived = true;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
