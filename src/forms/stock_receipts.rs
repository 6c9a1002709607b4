use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::stock_receipt::{NewStockReceipt, NewStockReceiptItem};
use crate::forms::{
    LINES_MAX_VALIDATOR, QUANTITY_MAX, parse_price_cents, sanitize_inline_text,
    sanitize_multiline_text,
};

const INVOICE_MAX_LEN_VALIDATOR: u64 = 64;

pub type StockReceiptFormResult<T> = Result<T, StockReceiptFormError>;

#[derive(Debug, Error)]
pub enum StockReceiptFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("invoice number cannot be empty")]
    EmptyInvoiceNumber,
    #[error("at least one item is required")]
    NoItems,
    #[error("line {line} has invalid unit price `{value}`")]
    InvalidUnitPrice { line: usize, value: String },
}

#[derive(Debug, Deserialize, Validate)]
pub struct StockReceiptLineForm {
    /// Product delivered.
    #[validate(range(min = 1))]
    pub product_id: i32,
    /// Units delivered.
    #[validate(range(min = 1, max = QUANTITY_MAX))]
    pub quantity: i32,
    /// Invoiced price per unit as a decimal amount.
    pub unit_price: String,
}

/// Goods delivered against a supplier invoice.
#[derive(Debug, Deserialize, Validate)]
pub struct AddStockReceiptForm {
    /// Supplier that delivered the goods.
    #[validate(range(min = 1))]
    pub supplier_id: i32,
    /// Supplier's invoice number, copied onto every stock movement.
    #[validate(length(min = 1, max = INVOICE_MAX_LEN_VALIDATOR))]
    pub invoice_number: String,
    /// Delivery date, `YYYY-MM-DD`.
    pub received_on: NaiveDate,
    /// Optional remarks about the delivery.
    #[serde(default)]
    pub notes: Option<String>,
    /// Delivered lines.
    #[validate(length(max = LINES_MAX_VALIDATOR), nested)]
    #[serde(default)]
    pub items: Vec<StockReceiptLineForm>,
}

impl AddStockReceiptForm {
    pub fn into_new_stock_receipt(
        self,
        location_id: i32,
    ) -> StockReceiptFormResult<NewStockReceipt> {
        if self.items.is_empty() {
            return Err(StockReceiptFormError::NoItems);
        }
        self.validate()?;

        let invoice_number = sanitize_inline_text(&self.invoice_number);
        if invoice_number.is_empty() {
            return Err(StockReceiptFormError::EmptyInvoiceNumber);
        }

        let mut items = Vec::with_capacity(self.items.len());
        for (index, line) in self.items.into_iter().enumerate() {
            let Some(unit_price_cents) = parse_price_cents(&line.unit_price) else {
                return Err(StockReceiptFormError::InvalidUnitPrice {
                    line: index + 1,
                    value: line.unit_price,
                });
            };
            items.push(NewStockReceiptItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price_cents,
            });
        }

        let mut receipt = NewStockReceipt::new(
            location_id,
            self.supplier_id,
            invoice_number,
            self.received_on,
            items,
        );
        if let Some(notes) = self
            .notes
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            receipt = receipt.with_notes(notes);
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(items: Vec<StockReceiptLineForm>) -> AddStockReceiptForm {
        AddStockReceiptForm {
            supplier_id: 2,
            invoice_number: " INV-0042 ".to_string(),
            received_on: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            notes: None,
            items,
        }
    }

    #[test]
    fn stock_receipt_form_computes_subtotals() {
        let receipt = form(vec![StockReceiptLineForm {
            product_id: 5,
            quantity: 4,
            unit_price: "1.25".to_string(),
        }])
        .into_new_stock_receipt(1)
        .expect("expected success");

        assert_eq!(receipt.invoice_number, "INV-0042");
        assert_eq!(receipt.items[0].subtotal_cents(), 500);
        assert_eq!(receipt.total_cents(), 500);
    }

    #[test]
    fn stock_receipt_form_requires_items() {
        let result = form(vec![]).into_new_stock_receipt(1);

        assert!(matches!(result, Err(StockReceiptFormError::NoItems)));
    }

    #[test]
    fn stock_receipt_form_rejects_quantity_above_limit() {
        let result = form(vec![StockReceiptLineForm {
            product_id: 1,
            quantity: QUANTITY_MAX + 1,
            unit_price: "1".to_string(),
        }])
        .into_new_stock_receipt(1);

        assert!(matches!(result, Err(StockReceiptFormError::Validation(_))));
    }
}
