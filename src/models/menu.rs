use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::menu::{
    Menu as DomainMenu, MenuCategory as DomainMenuCategory, NewMenu as DomainNewMenu,
    NewMenuCategory as DomainNewMenuCategory, UpdateMenu as DomainUpdateMenu,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::menu_categories)]
pub struct MenuCategory {
    pub id: i32,
    pub location_id: i32,
    pub name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menu_categories)]
pub struct NewMenuCategory<'a> {
    pub location_id: i32,
    pub name: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::menus)]
#[diesel(belongs_to(MenuCategory, foreign_key = menu_category_id))]
pub struct Menu {
    pub id: i32,
    pub location_id: i32,
    pub menu_category_id: i32,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub servings_left: i32,
    pub min_serving: i32,
    pub out_of_stock: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menus)]
pub struct NewMenu<'a> {
    pub location_id: i32,
    pub menu_category_id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
    pub servings_left: i32,
    pub min_serving: i32,
    pub out_of_stock: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::menus)]
pub struct UpdateMenu<'a> {
    pub menu_category_id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub price_cents: i64,
    pub servings_left: i32,
    pub min_serving: i32,
    pub out_of_stock: bool,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<MenuCategory> for DomainMenuCategory {
    fn from(value: MenuCategory) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            name: value.name,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewMenuCategory> for NewMenuCategory<'a> {
    fn from(value: &'a DomainNewMenuCategory) -> Self {
        Self {
            location_id: value.location_id,
            name: value.name.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl From<Menu> for DomainMenu {
    fn from(value: Menu) -> Self {
        Self {
            id: value.id,
            location_id: value.location_id,
            menu_category_id: value.menu_category_id,
            name: value.name,
            description: value.description,
            price_cents: value.price_cents,
            servings_left: value.servings_left,
            min_serving: value.min_serving,
            out_of_stock: value.out_of_stock,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewMenu> for NewMenu<'a> {
    fn from(value: &'a DomainNewMenu) -> Self {
        let details = &value.details;
        Self {
            location_id: value.location_id,
            menu_category_id: details.menu_category_id,
            name: details.name.as_str(),
            description: details.description.as_str(),
            price_cents: details.price_cents,
            servings_left: details.servings_left,
            min_serving: details.min_serving,
            out_of_stock: details.out_of_stock,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateMenu> for UpdateMenu<'a> {
    fn from(value: &'a DomainUpdateMenu) -> Self {
        let details = &value.details;
        Self {
            menu_category_id: details.menu_category_id,
            name: details.name.as_str(),
            description: details.description.as_str(),
            price_cents: details.price_cents,
            servings_left: details.servings_left,
            min_serving: details.min_serving,
            out_of_stock: details.out_of_stock,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
