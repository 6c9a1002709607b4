use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Grouping of menu items (drinks, mains, ...).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MenuCategory {
    pub id: i32,
    pub location_id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuCategory {
    pub location_id: i32,
    pub name: String,
    pub updated_at: NaiveDateTime,
}

impl NewMenuCategory {
    pub fn new(location_id: i32, name: impl Into<String>) -> Self {
        Self {
            location_id,
            name: name.into(),
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Availability of a menu item derived from its servings.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MenuStockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

/// Dish or drink offered by a location.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Menu {
    pub id: i32,
    pub location_id: i32,
    pub menu_category_id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    /// Portions that can still be served.
    pub servings_left: i32,
    /// At or below this many servings the item counts as low stock.
    pub min_serving: i32,
    /// Manual override marking the item unavailable.
    pub out_of_stock: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Menu {
    pub fn stock_status(&self) -> MenuStockStatus {
        menu_stock_status(self.out_of_stock, self.servings_left, self.min_serving)
    }
}

pub fn menu_stock_status(
    out_of_stock: bool,
    servings_left: i32,
    min_serving: i32,
) -> MenuStockStatus {
    if out_of_stock || servings_left <= 0 {
        MenuStockStatus::OutOfStock
    } else if servings_left <= min_serving {
        MenuStockStatus::LowStock
    } else {
        MenuStockStatus::InStock
    }
}

/// Menu item with its derived stock status, as returned to clients.
#[derive(Debug, Serialize, Clone)]
pub struct MenuView {
    #[serde(flatten)]
    pub menu: Menu,
    pub stock_status: MenuStockStatus,
}

impl From<Menu> for MenuView {
    fn from(menu: Menu) -> Self {
        let stock_status = menu.stock_status();
        Self { menu, stock_status }
    }
}

/// Menu fields shared by the insert and update payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDetails {
    pub menu_category_id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub servings_left: i32,
    pub min_serving: i32,
    pub out_of_stock: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMenu {
    pub location_id: i32,
    pub details: MenuDetails,
    pub updated_at: NaiveDateTime,
}

impl NewMenu {
    pub fn new(location_id: i32, details: MenuDetails) -> Self {
        Self {
            location_id,
            details,
            updated_at: Local::now().naive_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateMenu {
    pub details: MenuDetails,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateMenu {
    pub fn new(details: MenuDetails, is_active: bool) -> Self {
        Self {
            details,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list menu items.
#[derive(Debug, Clone)]
pub struct MenuListQuery {
    pub location_id: i32,
    pub menu_category_id: Option<i32>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl MenuListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            menu_category_id: None,
            search: None,
            pagination: None,
        }
    }

    pub fn menu_category_id(mut self, menu_category_id: i32) -> Self {
        self.menu_category_id = Some(menu_category_id);
        self
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_or_empty_servings_means_out_of_stock() {
        assert_eq!(menu_stock_status(true, 10, 2), MenuStockStatus::OutOfStock);
        assert_eq!(menu_stock_status(false, 0, 2), MenuStockStatus::OutOfStock);
    }

    #[test]
    fn servings_at_threshold_are_low() {
        assert_eq!(menu_stock_status(false, 2, 2), MenuStockStatus::LowStock);
        assert_eq!(menu_stock_status(false, 3, 2), MenuStockStatus::InStock);
    }
}
