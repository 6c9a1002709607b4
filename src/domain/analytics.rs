//! Stock and sales statistics computed from the transaction log.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::sale::Sale;
use crate::domain::transaction::InventoryTransaction;

/// Likelihood of running out of stock, derived from the coefficient of
/// variation of daily sales.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum StockoutRisk {
    Low,
    Medium,
    High,
}

impl StockoutRisk {
    fn from_variation(average: f64, deviation: f64) -> Self {
        if average <= 0.0 {
            return Self::Low;
        }
        let cv = deviation / average;
        if cv < 0.5 {
            Self::Low
        } else if cv < 1.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Reorder recommendation for one product.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StockPrediction {
    pub product_id: i32,
    /// Days of history the prediction was computed over.
    pub days: u32,
    pub average_daily_sales: f64,
    /// Population standard deviation of the daily totals.
    pub sales_variability: f64,
    pub predicted_weekly_need: f64,
    pub recommended_reorder_point: i32,
    pub stockout_risk: StockoutRisk,
}

/// Outgoing quantity for one calendar month (`YYYY-MM`).
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct MonthlyQuantity {
    pub month: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub total_cents: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct TopProduct {
    pub product_id: i32,
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub total_sales_cents: i64,
    /// Rounded down to whole cents; zero when there were no sales.
    pub average_order_value_cents: i64,
    pub total_items: i64,
    pub number_of_sales: usize,
    pub daily_totals: Vec<DailySales>,
    /// Best sellers by revenue, at most five.
    pub top_products: Vec<TopProduct>,
}

const TOP_PRODUCTS: usize = 5;

fn outgoing(transactions: &[InventoryTransaction]) -> impl Iterator<Item = &InventoryTransaction> {
    transactions.iter().filter(|t| t.kind.is_outgoing())
}

/// Sum of outgoing quantities per calendar day that saw any.
pub fn daily_outgoing(transactions: &[InventoryTransaction]) -> BTreeMap<NaiveDate, i64> {
    let mut days = BTreeMap::new();
    for t in outgoing(transactions) {
        *days.entry(t.created_at.date()).or_insert(0) += i64::from(t.quantity);
    }
    days
}

/// Reorder recommendation for `product_id` from the outgoing movements in
/// `transactions`. Movements of other products are ignored.
pub fn predict_stock_needs(
    product_id: i32,
    days: u32,
    transactions: &[InventoryTransaction],
) -> StockPrediction {
    let own: Vec<InventoryTransaction> = transactions
        .iter()
        .filter(|t| t.product_id == product_id)
        .cloned()
        .collect();
    let totals: Vec<f64> = daily_outgoing(&own).into_values().map(|q| q as f64).collect();

    let (average, deviation) = if totals.is_empty() {
        (0.0, 0.0)
    } else {
        let n = totals.len() as f64;
        let mean = totals.iter().sum::<f64>() / n;
        let variance = totals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, variance.sqrt())
    };

    let weekly = average * 7.0;
    let reorder_point = (weekly + deviation * 7f64.sqrt()).ceil() as i32;

    StockPrediction {
        product_id,
        days,
        average_daily_sales: average,
        sales_variability: deviation,
        predicted_weekly_need: weekly,
        recommended_reorder_point: reorder_point,
        stockout_risk: StockoutRisk::from_variation(average, deviation),
    }
}

/// Outgoing quantity per month, oldest first.
pub fn seasonal_trends(transactions: &[InventoryTransaction]) -> Vec<MonthlyQuantity> {
    let mut months: BTreeMap<String, i64> = BTreeMap::new();
    for t in outgoing(transactions) {
        *months
            .entry(t.created_at.format("%Y-%m").to_string())
            .or_insert(0) += i64::from(t.quantity);
    }
    months
        .into_iter()
        .map(|(month, quantity)| MonthlyQuantity { month, quantity })
        .collect()
}

/// Totals, daily revenue and best sellers over `sales`.
pub fn summarize_sales(sales: &[Sale]) -> SalesSummary {
    let total_sales_cents: i64 = sales.iter().map(|s| s.total_cents).sum();
    let average_order_value_cents = if sales.is_empty() {
        0
    } else {
        total_sales_cents / sales.len() as i64
    };

    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut products: HashMap<i32, TopProduct> = HashMap::new();
    let mut total_items = 0;

    for sale in sales {
        *daily.entry(sale.created_at.date()).or_insert(0) += sale.total_cents;
        for item in &sale.items {
            total_items += i64::from(item.quantity);
            let entry = products.entry(item.product_id).or_insert_with(|| TopProduct {
                product_id: item.product_id,
                name: item.name.clone(),
                quantity: 0,
                revenue_cents: 0,
            });
            entry.quantity += i64::from(item.quantity);
            entry.revenue_cents += item.line_total_cents();
        }
    }

    let mut top_products: Vec<TopProduct> = products.into_values().collect();
    top_products.sort_by(|a, b| {
        b.revenue_cents
            .cmp(&a.revenue_cents)
            .then(a.product_id.cmp(&b.product_id))
    });
    top_products.truncate(TOP_PRODUCTS);

    SalesSummary {
        total_sales_cents,
        average_order_value_cents,
        total_items,
        number_of_sales: sales.len(),
        daily_totals: daily
            .into_iter()
            .map(|(date, total_cents)| DailySales { date, total_cents })
            .collect(),
        top_products,
    }
}

/// Start of the window covering the last `days` days before `now`.
pub fn window_start(now: NaiveDateTime, days: u32) -> NaiveDateTime {
    now - chrono::Duration::days(i64::from(days))
}
