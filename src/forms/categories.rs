use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a category description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Payload for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, location_id: i32) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let mut new_category = NewCategory::new(location_id, name);
        if let Some(description) = clean_description(self.description.as_deref()) {
            new_category = new_category.with_description(description);
        }

        Ok(new_category)
    }
}

/// Payload for editing a category. A blank description clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional longer description.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    /// Inactive categories are listed only when asked for.
    #[serde(default)]
    pub is_active: bool,
}

impl EditCategoryForm {
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let EditCategoryForm {
            name,
            description,
            is_active,
        } = self;

        let name = sanitize_inline_text(&name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(UpdateCategory::new(
            name,
            clean_description(description.as_deref()),
            is_active,
        ))
    }
}

fn clean_description(description: Option<&str>) -> Option<String> {
    description
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_form_sanitizes_and_converts() {
        let form = AddCategoryForm {
            name: "  Fresh Produce  ".to_string(),
            description: Some("  Fruits\n\n Vegetables  ".to_string()),
        };

        let new_category = form
            .into_new_category(5)
            .expect("expected conversion to succeed");

        assert_eq!(new_category.location_id, 5);
        assert_eq!(new_category.name, "Fresh Produce");
        assert_eq!(
            new_category.description.as_deref(),
            Some("Fruits\n\nVegetables")
        );
    }

    #[test]
    fn add_category_form_rejects_empty_name() {
        let form = AddCategoryForm {
            name: "   ".to_string(),
            description: None,
        };

        let result = form.into_new_category(1);

        assert!(matches!(result, Err(CategoryFormError::EmptyName)));
    }

    #[test]
    fn edit_category_form_clears_blank_description() {
        let form = EditCategoryForm {
            name: " Pantry ".to_string(),
            description: Some("  ".to_string()),
            is_active: true,
        };

        let update = form
            .into_update_category()
            .expect("expected payload conversion to succeed");

        assert_eq!(update.name, "Pantry");
        assert!(update.description.is_none());
        assert!(update.is_active);
    }
}
