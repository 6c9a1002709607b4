use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::purchase_order::{
    NewPurchaseOrder, NewPurchaseOrderItem, ReceivedItem, UpdatePurchaseOrder,
};
use crate::forms::{LINES_MAX_VALIDATOR, QUANTITY_MAX, parse_price_cents, sanitize_multiline_text};

const NOTES_MAX_LEN_VALIDATOR: u64 = 2048;

pub type PurchaseOrderFormResult<T> = Result<T, PurchaseOrderFormError>;

#[derive(Debug, Error)]
pub enum PurchaseOrderFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("line {line} has invalid unit price `{value}`")]
    InvalidUnitPrice { line: usize, value: String },
}

/// One ordered product. `unit_price` is a decimal amount.
#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseOrderLineForm {
    /// Product being ordered.
    #[validate(range(min = 1))]
    pub product_id: i32,
    /// Units ordered.
    #[validate(range(min = 1, max = QUANTITY_MAX))]
    pub quantity: i32,
    /// Price per unit agreed with the supplier.
    pub unit_price: String,
}

/// Payload used both to create a purchase order and to replace a requested one.
#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseOrderForm {
    /// Supplier the order is placed with.
    #[validate(range(min = 1))]
    pub supplier_id: i32,
    /// `YYYY-MM-DD`.
    pub expected_delivery: NaiveDate,
    /// Free-form notes for the supplier or the receiving clerk.
    #[validate(length(max = NOTES_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub notes: Option<String>,
    /// Ordered lines; at least one is required.
    #[validate(length(min = 1, max = LINES_MAX_VALIDATOR), nested)]
    pub items: Vec<PurchaseOrderLineForm>,
}

impl PurchaseOrderForm {
    pub fn into_new_purchase_order(
        self,
        location_id: i32,
    ) -> PurchaseOrderFormResult<NewPurchaseOrder> {
        self.validate()?;

        let items = convert_lines(self.items)?;
        let mut order =
            NewPurchaseOrder::new(location_id, self.supplier_id, self.expected_delivery, items);
        if let Some(notes) = clean_notes(self.notes.as_deref()) {
            order = order.with_notes(notes);
        }
        Ok(order)
    }

    pub fn into_update_purchase_order(self) -> PurchaseOrderFormResult<UpdatePurchaseOrder> {
        self.validate()?;

        Ok(UpdatePurchaseOrder {
            supplier_id: self.supplier_id,
            expected_delivery: self.expected_delivery,
            notes: clean_notes(self.notes.as_deref()),
            items: convert_lines(self.items)?,
            updated_at: chrono::Local::now().naive_utc(),
        })
    }
}

fn convert_lines(
    lines: Vec<PurchaseOrderLineForm>,
) -> PurchaseOrderFormResult<Vec<NewPurchaseOrderItem>> {
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let unit_price_cents = parse_price_cents(&line.unit_price).ok_or_else(|| {
                PurchaseOrderFormError::InvalidUnitPrice {
                    line: index + 1,
                    value: line.unit_price.clone(),
                }
            })?;
            Ok(NewPurchaseOrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price_cents,
            })
        })
        .collect()
}

fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReceiveLineForm {
    /// Order line the count refers to.
    #[validate(range(min = 1))]
    pub item_id: i32,
    /// Units actually delivered; may differ from the ordered quantity.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    pub quantity_received: i32,
}

/// Delivered quantities. Lines left out are taken as delivered in full.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReceivePurchaseOrderForm {
    /// Per-line overrides.
    #[validate(length(max = LINES_MAX_VALIDATOR), nested)]
    #[serde(default)]
    pub items: Vec<ReceiveLineForm>,
}

impl ReceivePurchaseOrderForm {
    pub fn into_received_items(self) -> PurchaseOrderFormResult<Vec<ReceivedItem>> {
        self.validate()?;
        Ok(self
            .items
            .into_iter()
            .map(|line| ReceivedItem {
                item_id: line.item_id,
                quantity_received: line.quantity_received,
            })
            .collect())
    }
}
