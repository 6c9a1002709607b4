use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::money::{line_cents, sum_cents};
use crate::domain::product::Product;
use crate::domain::sync::SyncStatus;

/// How the customer settled a sale.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl From<&str> for PaymentMethod {
    fn from(value: &str) -> Self {
        match value {
            "card" => Self::Card,
            _ => Self::Cash,
        }
    }
}

impl From<PaymentMethod> for &'static str {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        <&'static str>::from(value).to_string()
    }
}

/// Line of a completed sale. The name and price are copied from the product
/// at checkout time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SaleItem {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price_cents: i64,
}

impl SaleItem {
    pub fn line_total_cents(&self) -> i64 {
        line_cents(self.quantity, self.price_cents)
    }
}

/// Completed point-of-sale checkout.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Sale {
    /// Unique identifier of the sale.
    pub id: i32,
    /// Location the sale was rung up at.
    pub location_id: i32,
    /// Optional customer the sale is attributed to.
    pub customer_id: Option<i32>,
    pub payment_method: PaymentMethod,
    /// Sum of the line totals in the smallest currency unit.
    pub total_cents: i64,
    pub items: Vec<SaleItem>,
    /// Replication state of the record.
    pub sync_status: SyncStatus,
    pub created_at: NaiveDateTime,
}

impl Sale {
    /// Reference written to the inventory transactions of this sale.
    pub fn reference(&self) -> String {
        sale_reference(self.id)
    }
}

pub fn sale_reference(sale_id: i32) -> String {
    format!("SALE-{sale_id}")
}

/// Line payload for a new sale.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSaleItem {
    pub product_id: i32,
    pub name: String,
    pub quantity: i32,
    pub price_cents: i64,
}

/// Payload required to record a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub location_id: i32,
    pub customer_id: Option<i32>,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewSaleItem>,
    pub created_at: NaiveDateTime,
}

impl NewSale {
    pub fn total_cents(&self) -> i64 {
        sum_cents(
            self.items
                .iter()
                .map(|item| line_cents(item.quantity, item.price_cents)),
        )
    }
}

/// Product staged in the cart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: i32,
    pub name: String,
    pub price_cents: i64,
    pub quantity: i32,
}

/// In-progress sale assembled at the register.
///
/// Each product appears at most once; adding it again bumps the quantity.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub customer_id: Option<i32>,
    pub payment_method: PaymentMethod,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product.id)
        {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                price_cents: product.price_cents,
                quantity: 1,
            }),
        }
    }

    pub fn remove(&mut self, product_id: i32) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Set the quantity of a line; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: i32, quantity: i32) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_cents(&self) -> i64 {
        sum_cents(
            self.items
                .iter()
                .map(|item| line_cents(item.quantity, item.price_cents)),
        )
    }

    /// Turn the cart into a sale payload for `location_id`.
    pub fn to_new_sale(&self, location_id: i32) -> NewSale {
        NewSale {
            location_id,
            customer_id: self.customer_id,
            payment_method: self.payment_method,
            items: self
                .items
                .iter()
                .map(|item| NewSaleItem {
                    product_id: item.product_id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price_cents: item.price_cents,
                })
                .collect(),
            created_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list sales.
#[derive(Debug, Clone)]
pub struct SaleListQuery {
    pub location_id: i32,
    pub customer_id: Option<i32>,
    /// Inclusive lower bound on `created_at`.
    pub from: Option<NaiveDateTime>,
    /// Inclusive upper bound on `created_at`.
    pub to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl SaleListQuery {
    pub fn new(location_id: i32) -> Self {
        Self {
            location_id,
            customer_id: None,
            from: None,
            to: None,
            pagination: None,
        }
    }

    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn between(mut self, from: NaiveDateTime, to: NaiveDateTime) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, price_cents: i64) -> Product {
        let now = Local::now().naive_utc();
        Product {
            id,
            location_id: 1,
            category_id: None,
            name: format!("Product {id}"),
            sku: format!("SKU-{id}"),
            price_cents,
            min_quantity: 0,
            units: None,
            is_archived: false,
            sync_status: SyncStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn adding_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let rice = product(1, 1500);
        cart.add(&rice);
        cart.add(&rice);
        cart.add(&product(2, 200));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total_cents(), 3200);
    }

    #[test]
    fn zero_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.update_quantity(1, 5);
        assert_eq!(cart.total_cents(), 500);

        cart.update_quantity(1, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_resets_customer_and_payment() {
        let mut cart = Cart::new();
        cart.add(&product(1, 100));
        cart.customer_id = Some(3);
        cart.payment_method = PaymentMethod::Card;

        cart.clear();

        assert_eq!(cart, Cart::default());
    }

    #[test]
    fn new_sale_copies_cart_lines() {
        let mut cart = Cart::new();
        cart.add(&product(7, 250));
        cart.update_quantity(7, 4);
        cart.payment_method = PaymentMethod::Card;

        let sale = cart.to_new_sale(9);

        assert_eq!(sale.location_id, 9);
        assert_eq!(sale.payment_method, PaymentMethod::Card);
        assert_eq!(sale.items[0].quantity, 4);
        assert_eq!(sale.total_cents(), 1000);
    }
}
