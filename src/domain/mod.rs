pub mod activity;
pub mod analytics;
pub mod category;
pub mod customer;
pub mod inventory;
pub mod location;
pub mod menu;
pub mod money;
pub mod product;
pub mod purchase_order;
pub mod sale;
pub mod station;
pub mod stock_receipt;
pub mod supplier;
pub mod sync;
pub mod transaction;
