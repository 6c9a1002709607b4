//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use pushkind_common::db::{DbPool, establish_connection_pool};

use pushkind_inventory::domain::product::Product;
use pushkind_inventory::domain::station::Station;
use pushkind_inventory::domain::supplier::Supplier;
use pushkind_inventory::forms::inventory::AddInventoryForm;
use pushkind_inventory::forms::products::AddProductForm;
use pushkind_inventory::forms::suppliers::{AddSupplierForm, SupplierFields};
use pushkind_inventory::repository::DieselRepository;
use pushkind_inventory::services::{inventory, products, suppliers};

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        pushkind_inventory::run_migrations(&pool).expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn station() -> Station {
    Station::new(1, "Tester")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn seed_product(repo: &DieselRepository, name: &str, sku: &str, price: &str) -> Product {
    products::create_product(
        repo,
        &station(),
        AddProductForm {
            name: name.to_string(),
            sku: sku.to_string(),
            price: price.to_string(),
            min_quantity: 0,
            units: None,
            category_id: None,
        },
    )
    .expect("create product")
}

pub fn seed_stock(repo: &DieselRepository, product_id: i32, quantity: i32) {
    inventory::add_inventory(
        repo,
        &station(),
        AddInventoryForm {
            product_id,
            quantity,
            min_quantity: 2,
        },
    )
    .expect("add inventory");
}

pub fn seed_supplier(repo: &DieselRepository, name: &str) -> Supplier {
    suppliers::create_supplier(
        repo,
        &station(),
        AddSupplierForm {
            fields: SupplierFields {
                name: name.to_string(),
                contact_person: "Ngozi".to_string(),
                email: "orders@supplier.example".to_string(),
                phone: "+2348000000000".to_string(),
                address: "12 Market Road".to_string(),
                website: None,
                payment_terms: Some("Net 30".to_string()),
                is_preferred: false,
            },
        },
    )
    .expect("create supplier")
}
