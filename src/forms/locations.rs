use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::location::{NewLocation, UpdateLocation};
use crate::forms::{sanitize_inline_text, sanitize_optional};

const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

pub type LocationFormResult<T> = Result<T, LocationFormError>;

#[derive(Debug, Error)]
pub enum LocationFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("location name cannot be empty")]
    EmptyName,
}

/// Payload for registering a new location.
#[derive(Debug, Deserialize, Validate)]
pub struct AddLocationForm {
    /// Name of the shop or branch.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional contact email.
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
}

impl AddLocationForm {
    pub fn into_new_location(self) -> LocationFormResult<NewLocation> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(LocationFormError::EmptyName);
        }

        let mut new_location = NewLocation::new(name);
        if let Some(email) = sanitize_optional(self.email.as_deref()) {
            new_location = new_location.with_email(email);
        }
        Ok(new_location)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditLocationForm {
    /// Name of the shop or branch.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional contact email.
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    /// Defaults to active when omitted.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl EditLocationForm {
    pub fn into_update_location(self) -> LocationFormResult<UpdateLocation> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(LocationFormError::EmptyName);
        }

        Ok(UpdateLocation::new(
            name,
            sanitize_optional(self.email.as_deref()),
            self.is_active,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_location_form_sanitizes_name() {
        let form = AddLocationForm {
            name: "  Main   Store ".to_string(),
            email: Some("shop@example.com".to_string()),
        };

        let location = form.into_new_location().expect("expected success");

        assert_eq!(location.name, "Main Store");
        assert_eq!(location.email.as_deref(), Some("shop@example.com"));
    }

    #[test]
    fn add_location_form_rejects_bad_email() {
        let form = AddLocationForm {
            name: "Main".to_string(),
            email: Some("not-an-email".to_string()),
        };

        let result = form.into_new_location();

        assert!(matches!(result, Err(LocationFormError::Validation(_))));
    }

    #[test]
    fn edit_location_form_rejects_blank_name() {
        let form = EditLocationForm {
            name: " \t ".to_string(),
            email: None,
            is_active: false,
        };

        let result = form.into_update_location();

        assert!(matches!(result, Err(LocationFormError::EmptyName)));
    }
}
