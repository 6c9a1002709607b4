use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::menu::{MenuDetails, NewMenu, NewMenuCategory, UpdateMenu};
use crate::forms::{QUANTITY_MAX, parse_price_cents, sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = 2048;

pub type MenuFormResult<T> = Result<T, MenuFormError>;

#[derive(Debug, Error)]
pub enum MenuFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name cannot be empty")]
    EmptyName,
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
}

#[derive(Debug, Deserialize, Validate)]
pub struct MenuFields {
    /// Menu section the dish is listed under.
    #[validate(range(min = 1))]
    pub menu_category_id: i32,
    /// Dish name shown to the cashier.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional description for the menu board.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: String,
    /// Price per serving as a decimal amount.
    pub price: String,
    /// Servings still available today.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    #[serde(default)]
    pub servings_left: i32,
    /// Count at or below which the dish is reported as low stock.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    #[serde(default)]
    pub min_serving: i32,
    /// Manual sold-out switch.
    #[serde(default)]
    pub out_of_stock: bool,
}

impl MenuFields {
    fn into_details(self) -> MenuFormResult<MenuDetails> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(MenuFormError::EmptyName);
        }
        let price_cents = parse_price_cents(&self.price)
            .ok_or(MenuFormError::InvalidPrice { value: self.price })?;

        Ok(MenuDetails {
            menu_category_id: self.menu_category_id,
            name,
            description: sanitize_multiline_text(&self.description),
            price_cents,
            servings_left: self.servings_left,
            min_serving: self.min_serving,
            out_of_stock: self.out_of_stock,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMenuForm {
    #[serde(flatten)]
    pub fields: MenuFields,
}

impl AddMenuForm {
    pub fn into_new_menu(self, location_id: i32) -> MenuFormResult<NewMenu> {
        Ok(NewMenu::new(location_id, self.fields.into_details()?))
    }
}

#[derive(Debug, Deserialize)]
pub struct EditMenuForm {
    #[serde(flatten)]
    pub fields: MenuFields,
    /// Inactive dishes are hidden from the register.
    #[serde(default)]
    pub is_active: bool,
}

impl EditMenuForm {
    pub fn into_update_menu(self) -> MenuFormResult<UpdateMenu> {
        Ok(UpdateMenu::new(self.fields.into_details()?, self.is_active))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMenuCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl AddMenuCategoryForm {
    pub fn into_new_menu_category(self, location_id: i32) -> MenuFormResult<NewMenuCategory> {
        self.validate()?;
        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(MenuFormError::EmptyName);
        }
        Ok(NewMenuCategory::new(location_id, name))
    }
}
