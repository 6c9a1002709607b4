pub use pushkind_common::services::errors::{ServiceError, ServiceResult};

use crate::repository::WriteError;

pub mod activities;
pub mod analytics;
pub mod categories;
pub mod customers;
pub mod inventory;
pub mod locations;
pub mod menus;
pub mod products;
pub mod purchase_orders;
pub mod receipts;
pub mod sales;
pub mod stock_receipts;
pub mod suppliers;
pub mod sync;
pub mod transactions;

/// Stock problems found inside the store transaction are reported like
/// the same problems caught up front.
impl From<WriteError> for ServiceError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Repository(err) => ServiceError::from(err),
            WriteError::StatusChanged => ServiceError::Conflict,
            err @ (WriteError::InsufficientStock { .. } | WriteError::QuantityOverflow { .. }) => {
                ServiceError::Form(err.to_string())
            }
        }
    }
}
