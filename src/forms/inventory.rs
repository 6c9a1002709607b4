use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::inventory::{NewInventoryRecord, UpdateInventoryRecord};
use crate::forms::QUANTITY_MAX;

pub type InventoryFormResult<T> = Result<T, InventoryFormError>;

#[derive(Debug, Error)]
pub enum InventoryFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// Start tracking stock of a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddInventoryForm {
    /// Product to track; it must not be tracked yet.
    #[validate(range(min = 1))]
    pub product_id: i32,
    /// Opening stock count.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    pub quantity: i32,
    /// Count at or below which the item is reported as low stock.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    #[serde(default)]
    pub min_quantity: i32,
}

impl AddInventoryForm {
    pub fn into_new_inventory(self, location_id: i32) -> InventoryFormResult<NewInventoryRecord> {
        self.validate()?;
        Ok(NewInventoryRecord::new(
            location_id,
            self.product_id,
            self.quantity,
            self.min_quantity,
        ))
    }
}

/// Stock count correction. Quantities below zero are rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct EditInventoryForm {
    /// Counted stock replacing the stored quantity.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    pub quantity: i32,
    /// Low-stock threshold for the record.
    #[validate(range(min = 0, max = QUANTITY_MAX))]
    pub min_quantity: i32,
}

impl EditInventoryForm {
    pub fn into_update_inventory(self) -> InventoryFormResult<UpdateInventoryRecord> {
        self.validate()?;
        Ok(UpdateInventoryRecord::new(self.quantity, self.min_quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_inventory_form_converts() {
        let form = AddInventoryForm {
            product_id: 7,
            quantity: 12,
            min_quantity: 2,
        };

        let record = form.into_new_inventory(3).expect("expected success");

        assert_eq!(record.location_id, 3);
        assert_eq!(record.product_id, 7);
        assert_eq!(record.quantity, 12);
        assert_eq!(record.min_quantity, 2);
    }

    #[test]
    fn edit_inventory_form_rejects_negative_quantity() {
        let form = EditInventoryForm {
            quantity: -1,
            min_quantity: 0,
        };

        let result = form.into_update_inventory();

        assert!(matches!(result, Err(InventoryFormError::Validation(_))));
    }

    #[test]
    fn add_inventory_form_rejects_quantity_above_limit() {
        let form = AddInventoryForm {
            product_id: 7,
            quantity: QUANTITY_MAX + 1,
            min_quantity: 0,
        };

        let result = form.into_new_inventory(3);

        assert!(matches!(result, Err(InventoryFormError::Validation(_))));
    }
}
