use chrono::{Months, NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::transaction::{TransactionKind, TransactionListQuery};

pub type TransactionFilterResult<T> = Result<T, TransactionFilterError>;

#[derive(Debug, Error)]
pub enum TransactionFilterError {
    #[error("unknown transaction type `{0}`")]
    UnknownKind(String),
    #[error("start date {from} is after end date {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Query-string filter for the transaction history.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionFilterForm {
    /// `all`, `in`, `out` or `sale`.
    #[serde(default)]
    pub kind: Option<String>,
    /// First day of the range.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Last day of the range, inclusive.
    #[serde(default)]
    pub to: Option<NaiveDate>,
    /// Restrict the history to one product.
    #[serde(default)]
    pub product_id: Option<i32>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<usize>,
}

impl TransactionFilterForm {
    /// Build the list query. Without dates the range is the month ending
    /// `today`; the end date includes the whole day.
    pub fn into_query(
        self,
        location_id: i32,
        today: NaiveDate,
    ) -> TransactionFilterResult<TransactionListQuery> {
        let to = self.to.unwrap_or(today);
        let from = match self.from {
            Some(from) => from,
            None => to.checked_sub_months(Months::new(1)).unwrap_or(to),
        };
        if from > to {
            return Err(TransactionFilterError::InvertedRange { from, to });
        }

        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        let mut query = TransactionListQuery::new(location_id)
            .between(from.and_time(NaiveTime::MIN), to.and_time(end_of_day));

        match self.kind.as_deref().map(str::trim) {
            None | Some("") | Some("all") => {}
            Some(kind @ ("in" | "out" | "sale")) => {
                query = query.kind(TransactionKind::from(kind));
            }
            Some(other) => return Err(TransactionFilterError::UnknownKind(other.to_string())),
        }

        if let Some(product_id) = self.product_id {
            query = query.product_id(product_id);
        }

        Ok(query)
    }
}
