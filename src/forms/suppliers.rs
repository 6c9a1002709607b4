use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::supplier::{NewSupplier, PaymentTerms, SupplierDetails, UpdateSupplier};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text, sanitize_optional};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;
const PHONE_MAX_LEN_VALIDATOR: u64 = 32;
const ADDRESS_MAX_LEN_VALIDATOR: u64 = 512;

pub type SupplierFormResult<T> = Result<T, SupplierFormError>;

#[derive(Debug, Error)]
pub enum SupplierFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("unknown payment terms `{value}`")]
    InvalidPaymentTerms { value: String },
}

/// Supplier fields shared by the add and edit payloads.
#[derive(Debug, Deserialize, Validate)]
pub struct SupplierFields {
    /// Trading name of the supplier.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Person to talk to about orders.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub contact_person: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = PHONE_MAX_LEN_VALIDATOR))]
    pub phone: String,
    /// Postal address; may span several lines.
    #[validate(length(min = 1, max = ADDRESS_MAX_LEN_VALIDATOR))]
    pub address: String,
    /// Optional absolute URL.
    #[validate(url)]
    #[serde(default)]
    pub website: Option<String>,
    /// One of the labels of [`PaymentTerms`]; defaults to `Net 30`.
    #[serde(default)]
    pub payment_terms: Option<String>,
    /// Preferred suppliers are listed first when ordering.
    #[serde(default)]
    pub is_preferred: bool,
}

impl SupplierFields {
    fn into_details(self) -> SupplierFormResult<SupplierDetails> {
        self.validate()?;

        let payment_terms = match self.payment_terms.as_deref().map(str::trim) {
            None | Some("") => PaymentTerms::default(),
            Some(value) => PaymentTerms::parse(value).ok_or_else(|| {
                SupplierFormError::InvalidPaymentTerms {
                    value: value.to_string(),
                }
            })?,
        };

        Ok(SupplierDetails {
            name: required(&self.name, "supplier name")?,
            contact_person: required(&self.contact_person, "contact person")?,
            email: self.email.trim().to_string(),
            phone: required(&self.phone, "phone")?,
            address: {
                let address = sanitize_multiline_text(&self.address);
                if address.is_empty() {
                    return Err(SupplierFormError::EmptyField { field: "address" });
                }
                address
            },
            website: sanitize_optional(self.website.as_deref()),
            payment_terms,
            is_preferred: self.is_preferred,
        })
    }
}

fn required(value: &str, field: &'static str) -> SupplierFormResult<String> {
    let sanitized = sanitize_inline_text(value);
    if sanitized.is_empty() {
        return Err(SupplierFormError::EmptyField { field });
    }
    Ok(sanitized)
}

#[derive(Debug, Deserialize)]
pub struct AddSupplierForm {
    #[serde(flatten)]
    pub fields: SupplierFields,
}

impl AddSupplierForm {
    pub fn into_new_supplier(self, location_id: i32) -> SupplierFormResult<NewSupplier> {
        Ok(NewSupplier::new(location_id, self.fields.into_details()?))
    }
}

#[derive(Debug, Deserialize)]
pub struct EditSupplierForm {
    #[serde(flatten)]
    pub fields: SupplierFields,
    /// Whether the supplier is still traded with.
    #[serde(default)]
    pub is_active: bool,
}

impl EditSupplierForm {
    pub fn into_update_supplier(self) -> SupplierFormResult<UpdateSupplier> {
        Ok(UpdateSupplier::new(
            self.fields.into_details()?,
            self.is_active,
        ))
    }
}
