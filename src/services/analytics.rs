use chrono::{Datelike, Months, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::analytics::{
    MonthlyQuantity, SalesSummary, StockPrediction, predict_stock_needs, seasonal_trends,
    summarize_sales, window_start,
};
use crate::domain::sale::SaleListQuery;
use crate::domain::station::Station;
use crate::domain::transaction::TransactionListQuery;
use crate::repository::{ProductReader, SaleReader, TransactionReader};
use crate::services::{ServiceError, ServiceResult};

pub const DEFAULT_DAYS: u32 = 30;
pub const DEFAULT_MONTHS: u32 = 12;
const MAX_DAYS: u32 = 366;
const MAX_MONTHS: u32 = 36;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<u32>,
    pub months: Option<u32>,
}

impl AnalyticsQuery {
    fn days(&self) -> ServiceResult<u32> {
        bounded(self.days.unwrap_or(DEFAULT_DAYS), MAX_DAYS, "days")
    }

    fn months(&self) -> ServiceResult<u32> {
        bounded(self.months.unwrap_or(DEFAULT_MONTHS), MAX_MONTHS, "months")
    }
}

fn bounded(value: u32, max: u32, name: &str) -> ServiceResult<u32> {
    if value == 0 || value > max {
        return Err(ServiceError::Form(format!(
            "`{name}` must be between 1 and {max}"
        )));
    }
    Ok(value)
}

#[derive(Debug, Serialize)]
pub struct ProductAnalytics {
    pub prediction: StockPrediction,
    pub seasonal_trends: Vec<MonthlyQuantity>,
}

/// Reorder recommendation and monthly movement history of one product.
pub fn product_analytics<R>(
    repo: &R,
    station: &Station,
    product_id: i32,
    query: AnalyticsQuery,
    now: NaiveDateTime,
) -> ServiceResult<ProductAnalytics>
where
    R: TransactionReader + ProductReader + ?Sized,
{
    let days = query.days()?;
    let months = query.months()?;

    if repo
        .get_product_by_id(product_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    let recent = repo
        .list_transactions(
            TransactionListQuery::new(station.location_id)
                .product_id(product_id)
                .between(window_start(now, days), now),
        )
        .map_err(ServiceError::from)?
        .1;

    let history = repo
        .list_transactions(
            TransactionListQuery::new(station.location_id)
                .product_id(product_id)
                .between(months_start(now, months), now),
        )
        .map_err(ServiceError::from)?
        .1;

    Ok(ProductAnalytics {
        prediction: predict_stock_needs(product_id, days, &recent),
        seasonal_trends: seasonal_trends(&history),
    })
}

/// Sales totals over the last `days` days.
pub fn sales_summary<R>(
    repo: &R,
    station: &Station,
    query: AnalyticsQuery,
    now: NaiveDateTime,
) -> ServiceResult<SalesSummary>
where
    R: SaleReader + ?Sized,
{
    let days = query.days()?;

    let (_, sales) = repo
        .list_sales(SaleListQuery::new(station.location_id).between(window_start(now, days), now))
        .map_err(ServiceError::from)?;

    Ok(summarize_sales(&sales))
}

/// Midnight of the first day of the month `months - 1` months before `now`.
fn months_start(now: NaiveDateTime, months: u32) -> NaiveDateTime {
    let first_of_month = now.date().with_day(1).unwrap_or(now.date());
    first_of_month
        .checked_sub_months(Months::new(months.saturating_sub(1)))
        .unwrap_or(first_of_month)
        .and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::analytics::StockoutRisk;
    use crate::domain::product::Product;
    use crate::domain::sale::{PaymentMethod, Sale, SaleItem};
    use crate::domain::sync::SyncStatus;
    use crate::domain::transaction::{InventoryTransaction, TransactionKind};
    use crate::repository::mock::MockTransactionRepo;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: i32) -> Product {
        Product {
            id,
            location_id: 1,
            category_id: None,
            name: "Rice".to_string(),
            sku: "RC".to_string(),
            price_cents: 100,
            min_quantity: 0,
            units: None,
            is_archived: false,
            sync_status: SyncStatus::Pending,
            created_at: at(1, 0),
            updated_at: at(1, 0),
        }
    }

    fn movement(
        id: i32,
        kind: TransactionKind,
        quantity: i32,
        created_at: NaiveDateTime,
    ) -> InventoryTransaction {
        InventoryTransaction {
            id,
            location_id: 1,
            product_id: 5,
            inventory_id: Some(1),
            kind,
            quantity,
            price_cents: 100,
            reference: None,
            sync_status: SyncStatus::Pending,
            created_at,
        }
    }

    #[test]
    fn product_analytics_uses_outgoing_movements() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(sample_product(id))));
        repo.expect_list_transactions().times(2).returning(|_| {
            Ok((
                3,
                vec![
                    movement(1, TransactionKind::In, 50, at(1, 9)),
                    movement(2, TransactionKind::Sale, 4, at(2, 9)),
                    movement(3, TransactionKind::Out, 4, at(3, 9)),
                ],
            ))
        });

        let analytics = product_analytics(
            &repo,
            &Station::new(1, ""),
            5,
            AnalyticsQuery::default(),
            at(10, 12),
        )
        .expect("expected success");

        assert_eq!(analytics.prediction.average_daily_sales, 4.0);
        assert_eq!(analytics.prediction.recommended_reorder_point, 28);
        assert_eq!(analytics.prediction.stockout_risk, StockoutRisk::Low);
        assert_eq!(analytics.seasonal_trends.len(), 1);
        assert_eq!(analytics.seasonal_trends[0].quantity, 8);
    }

    #[test]
    fn product_analytics_unknown_product() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_get_product_by_id().returning(|_, _| Ok(None));
        repo.expect_list_transactions().never();

        let result = product_analytics(
            &repo,
            &Station::new(1, ""),
            5,
            AnalyticsQuery::default(),
            at(10, 12),
        );

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let repo = MockTransactionRepo::new();

        let result = sales_summary(
            &repo,
            &Station::new(1, ""),
            AnalyticsQuery {
                days: Some(0),
                months: None,
            },
            at(10, 12),
        );

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn sales_summary_covers_window() {
        let mut repo = MockTransactionRepo::new();
        repo.expect_list_sales()
            .times(1)
            .withf(|query| query.from == Some(at(3, 12)) && query.to == Some(at(10, 12)))
            .returning(|_| {
                Ok((
                    1,
                    vec![Sale {
                        id: 1,
                        location_id: 1,
                        customer_id: None,
                        payment_method: PaymentMethod::Cash,
                        total_cents: 700,
                        items: vec![SaleItem {
                            id: 1,
                            product_id: 5,
                            name: "Rice".to_string(),
                            quantity: 7,
                            price_cents: 100,
                        }],
                        sync_status: SyncStatus::Pending,
                        created_at: at(9, 8),
                    }],
                ))
            });

        let summary = sales_summary(
            &repo,
            &Station::new(1, ""),
            AnalyticsQuery {
                days: Some(7),
                months: None,
            },
            at(10, 12),
        )
        .expect("expected success");

        assert_eq!(summary.total_sales_cents, 700);
        assert_eq!(summary.total_items, 7);
        assert_eq!(summary.top_products.len(), 1);
    }

    #[test]
    fn months_start_is_first_of_month() {
        let expected =
            NaiveDate::from_ymd_opt(2023, 4, 1).map(|date| date.and_time(NaiveTime::MIN));
        assert_eq!(Some(months_start(at(10, 12), 12)), expected);
    }
}
