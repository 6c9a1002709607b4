use chrono::NaiveDateTime;

use crate::domain::station::Station;
use crate::forms::receipts::PrintReceiptForm;
use crate::printer::Receipt;
use crate::repository::SaleReader;
use crate::services::{ServiceError, ServiceResult};

pub fn build_receipt(form: PrintReceiptForm, printed_at: NaiveDateTime) -> ServiceResult<Receipt> {
    form.into_receipt(printed_at)
        .map_err(|err| ServiceError::Form(err.to_string()))
}

/// Receipt of a stored sale.
pub fn receipt_for_sale<R>(
    repo: &R,
    station: &Station,
    sale_id: i32,
    printed_at: NaiveDateTime,
) -> ServiceResult<Receipt>
where
    R: SaleReader + ?Sized,
{
    let sale = repo
        .get_sale_by_id(sale_id, station.location_id)?
        .ok_or(ServiceError::NotFound)?;
    Ok(Receipt::from_sale(&sale, printed_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::sale::{PaymentMethod, Sale, SaleItem};
    use crate::domain::sync::SyncStatus;
    use crate::repository::mock::MockTransactionRepo;

    #[test]
    fn receipt_for_sale_copies_lines() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_get_sale_by_id().returning(|id, location_id| {
            Ok(Some(Sale {
                id,
                location_id,
                customer_id: None,
                payment_method: PaymentMethod::Card,
                total_cents: 900,
                items: vec![SaleItem {
                    id: 1,
                    product_id: 2,
                    name: "Milk".to_string(),
                    quantity: 3,
                    price_cents: 300,
                }],
                sync_status: SyncStatus::Pending,
                created_at: NaiveDateTime::default(),
            }))
        });

        let receipt = receipt_for_sale(&repo, &Station::new(1, ""), 5, NaiveDateTime::default())
            .expect("expected success");

        assert_eq!(receipt.total_cents, 900);
        assert_eq!(receipt.lines[0].name, "Milk");
        assert_eq!(receipt.lines[0].amount_cents(), 900);
    }

    #[test]
    fn receipt_for_missing_sale() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_get_sale_by_id().returning(|_, _| Ok(None));

        let result = receipt_for_sale(&repo, &Station::new(1, ""), 5, NaiveDateTime::default());

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
