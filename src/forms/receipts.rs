use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::money::sum_cents;
use crate::forms::{LINES_MAX_VALIDATOR, QUANTITY_MAX, parse_price_cents, sanitize_inline_text};
use crate::printer::{Receipt, ReceiptLine};

const NAME_MAX_LEN_VALIDATOR: u64 = 128;

#[derive(Debug, Error)]
pub enum ReceiptFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("a receipt needs at least one line")]
    Empty,
    #[error("line {line} has invalid price `{value}`")]
    InvalidPrice { line: usize, value: String },
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReceiptLineForm {
    /// Text printed for the line.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Units sold.
    #[validate(range(min = 1, max = QUANTITY_MAX))]
    pub quantity: i32,
    /// Unit price as a decimal string.
    pub price: String,
}

/// Free-form receipt printed without a stored sale behind it.
#[derive(Debug, Deserialize, Validate)]
pub struct PrintReceiptForm {
    /// Printed lines in order.
    #[validate(length(max = LINES_MAX_VALIDATOR), nested)]
    #[serde(default)]
    pub items: Vec<ReceiptLineForm>,
}

impl PrintReceiptForm {
    /// The total is recomputed from the lines.
    pub fn into_receipt(self, printed_at: NaiveDateTime) -> Result<Receipt, ReceiptFormError> {
        if self.items.is_empty() {
            return Err(ReceiptFormError::Empty);
        }
        self.validate()?;

        let mut lines = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.into_iter().enumerate() {
            let unit_price_cents =
                parse_price_cents(&item.price).ok_or_else(|| ReceiptFormError::InvalidPrice {
                    line: index + 1,
                    value: item.price.clone(),
                })?;
            lines.push(ReceiptLine {
                name: sanitize_inline_text(&item.name),
                quantity: item.quantity,
                unit_price_cents,
            });
        }
        let total_cents = sum_cents(lines.iter().map(ReceiptLine::amount_cents));

        Ok(Receipt {
            lines,
            total_cents,
            printed_at,
        })
    }
}
