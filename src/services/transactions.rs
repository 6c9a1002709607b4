use chrono::NaiveDate;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};

use crate::domain::station::Station;
use crate::domain::transaction::InventoryTransaction;
use crate::forms::transactions::TransactionFilterForm;
use crate::repository::TransactionReader;
use crate::services::{ServiceError, ServiceResult};

/// Stock movements matching `filter`, newest first. Dates default to the
/// month ending `today`.
pub fn list_transactions<R>(
    repo: &R,
    station: &Station,
    filter: TransactionFilterForm,
    today: NaiveDate,
) -> ServiceResult<Paginated<InventoryTransaction>>
where
    R: TransactionReader + ?Sized,
{
    let page = filter.page.unwrap_or(1);
    let query = filter
        .into_query(station.location_id, today)
        .map_err(|err| ServiceError::Form(err.to_string()))?
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, items) = repo.list_transactions(query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        items,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::transaction::TransactionKind;
    use crate::repository::mock::MockTransactionRepo;

    #[test]
    fn list_transactions_applies_filter() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_list_transactions()
            .times(1)
            .withf(|query| {
                assert_eq!(query.location_id, 4);
                assert_eq!(query.kind, Some(TransactionKind::Out));
                assert_eq!(query.product_id, Some(12));
                assert_eq!(
                    query.to.map(|to| to.to_string()),
                    Some("2025-05-10 23:59:59".to_string())
                );
                match &query.pagination {
                    Some(pagination) => assert_eq!(pagination.page, 2),
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((0, Vec::new())));

        let filter = TransactionFilterForm {
            kind: Some("out".to_string()),
            product_id: Some(12),
            page: Some(2),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();

        let result = list_transactions(&repo, &Station::new(4, ""), filter, today);

        assert!(result.is_ok());
    }

    #[test]
    fn list_transactions_rejects_unknown_kind() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_list_transactions().never();

        let filter = TransactionFilterForm {
            kind: Some("gift".to_string()),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();

        let result = list_transactions(&repo, &Station::new(4, ""), filter, today);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
