use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::customer::{NewCustomer, UpdateCustomer};
use crate::forms::{sanitize_inline_text, sanitize_optional};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const PHONE_MAX_LEN_VALIDATOR: u64 = 32;

pub type CustomerFormResult<T> = Result<T, CustomerFormError>;

#[derive(Debug, Error)]
pub enum CustomerFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("customer name cannot be empty")]
    EmptyName,
}

/// Payload for registering a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCustomerForm {
    /// Full name of the customer.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional contact email.
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    /// Optional phone number, stored as typed.
    #[validate(length(max = PHONE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub phone: Option<String>,
}

impl AddCustomerForm {
    pub fn into_new_customer(self, location_id: i32) -> CustomerFormResult<NewCustomer> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CustomerFormError::EmptyName);
        }

        let mut customer = NewCustomer::new(location_id, name);
        if let Some(email) = sanitize_optional(self.email.as_deref()) {
            customer = customer.with_email(email);
        }
        if let Some(phone) = sanitize_optional(self.phone.as_deref()) {
            customer = customer.with_phone(phone);
        }
        Ok(customer)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditCustomerForm {
    /// Full name of the customer.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional contact email.
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    /// Optional phone number, stored as typed.
    #[validate(length(max = PHONE_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the customer is still served.
    #[serde(default)]
    pub is_active: bool,
}

impl EditCustomerForm {
    pub fn into_update_customer(self) -> CustomerFormResult<UpdateCustomer> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(CustomerFormError::EmptyName);
        }

        Ok(UpdateCustomer {
            name,
            email: sanitize_optional(self.email.as_deref()),
            phone: sanitize_optional(self.phone.as_deref()),
            is_active: self.is_active,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}
