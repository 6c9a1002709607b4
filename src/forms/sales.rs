use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::sale::PaymentMethod;
use crate::forms::{LINES_MAX_VALIDATOR, QUANTITY_MAX};

pub type SaleFormResult<T> = Result<T, SaleFormError>;

#[derive(Debug, Error)]
pub enum SaleFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("cart is empty")]
    EmptyCart,
    /// Repeated lines of one product add up beyond the quantity limit.
    #[error("quantity of product {product_id} exceeds {QUANTITY_MAX}")]
    QuantityTooLarge { product_id: i32 },
}

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutLineForm {
    /// Product scanned or picked at the register.
    #[validate(range(min = 1))]
    pub product_id: i32,
    /// Units sold.
    #[validate(range(min = 1, max = QUANTITY_MAX))]
    pub quantity: i32,
}

/// Cart submitted at the register. Prices are looked up server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutForm {
    /// Cart lines; a product may appear more than once.
    #[validate(length(max = LINES_MAX_VALIDATOR), nested)]
    #[serde(default)]
    pub items: Vec<CheckoutLineForm>,
    /// Cash unless stated otherwise.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    /// Optional customer the sale is booked to.
    #[serde(default)]
    pub customer_id: Option<i32>,
}

/// Normalized checkout request; each product appears once.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutPayload {
    /// `(product_id, quantity)` pairs.
    pub lines: Vec<(i32, i32)>,
    pub payment_method: PaymentMethod,
    pub customer_id: Option<i32>,
}

impl CheckoutForm {
    pub fn into_payload(self) -> SaleFormResult<CheckoutPayload> {
        if self.items.is_empty() {
            return Err(SaleFormError::EmptyCart);
        }
        self.validate()?;

        let mut lines: Vec<(i32, i32)> = Vec::with_capacity(self.items.len());
        for item in self.items {
            match lines.iter_mut().find(|(id, _)| *id == item.product_id) {
                Some((product_id, quantity)) => {
                    *quantity = quantity
                        .checked_add(item.quantity)
                        .filter(|merged| *merged <= QUANTITY_MAX)
                        .ok_or(SaleFormError::QuantityTooLarge {
                            product_id: *product_id,
                        })?;
                }
                None => lines.push((item.product_id, item.quantity)),
            }
        }

        Ok(CheckoutPayload {
            lines,
            payment_method: self.payment_method,
            customer_id: self.customer_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i32, quantity: i32) -> CheckoutLineForm {
        CheckoutLineForm {
            product_id,
            quantity,
        }
    }

    #[test]
    fn checkout_form_merges_repeated_products() {
        let form = CheckoutForm {
            items: vec![line(1, 2), line(2, 1), line(1, 3)],
            payment_method: PaymentMethod::Card,
            customer_id: Some(8),
        };

        let payload = form.into_payload().expect("expected success");

        assert_eq!(payload.lines, vec![(1, 5), (2, 1)]);
        assert_eq!(payload.payment_method, PaymentMethod::Card);
        assert_eq!(payload.customer_id, Some(8));
    }

    #[test]
    fn checkout_form_rejects_empty_cart() {
        let form = CheckoutForm {
            items: vec![],
            payment_method: PaymentMethod::Cash,
            customer_id: None,
        };

        assert!(matches!(form.into_payload(), Err(SaleFormError::EmptyCart)));
    }

    #[test]
    fn checkout_form_rejects_zero_quantity() {
        let form = CheckoutForm {
            items: vec![line(1, 0)],
            payment_method: PaymentMethod::Cash,
            customer_id: None,
        };

        assert!(matches!(
            form.into_payload(),
            Err(SaleFormError::Validation(_))
        ));
    }

    #[test]
    fn checkout_form_rejects_quantity_above_limit() {
        let form = CheckoutForm {
            items: vec![line(1, i32::MAX)],
            payment_method: PaymentMethod::Cash,
            customer_id: None,
        };

        assert!(matches!(
            form.into_payload(),
            Err(SaleFormError::Validation(_))
        ));
    }

    #[test]
    fn checkout_form_rejects_merged_quantity_above_limit() {
        let form = CheckoutForm {
            items: vec![line(1, QUANTITY_MAX), line(2, 1), line(1, QUANTITY_MAX)],
            payment_method: PaymentMethod::Cash,
            customer_id: None,
        };

        assert!(matches!(
            form.into_payload(),
            Err(SaleFormError::QuantityTooLarge { product_id: 1 })
        ));
    }
}
