//! JSON handlers mounted under `/api/v1`.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::services::{ServiceError, ServiceResult};
use crate::sync::SyncState;

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

#[derive(Serialize)]
pub(crate) struct ErrorBody<'a> {
    pub(crate) error: &'a str,
}

/// Register every API handler. Mount inside `web::scope("/api/v1")`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(locations::list_locations)
        .service(locations::add_location)
        .service(locations::edit_location)
        .service(categories::list_categories)
        .service(categories::add_category)
        .service(categories::edit_category)
        // `upload` is registered before `{id}` so it is not parsed as an id.
        .service(products::upload_products)
        .service(products::list_products)
        .service(products::show_product)
        .service(products::add_product)
        .service(products::edit_product)
        .service(inventory::list_inventory)
        .service(inventory::add_inventory)
        .service(inventory::edit_inventory)
        .service(transactions::list_transactions)
        .service(suppliers::list_suppliers)
        .service(suppliers::show_supplier)
        .service(suppliers::add_supplier)
        .service(suppliers::edit_supplier)
        .service(customers::list_customers)
        .service(customers::show_customer)
        .service(customers::add_customer)
        .service(customers::edit_customer)
        .service(purchase_orders::list_purchase_orders)
        .service(purchase_orders::show_purchase_order)
        .service(purchase_orders::add_purchase_order)
        .service(purchase_orders::edit_purchase_order)
        .service(purchase_orders::approve_purchase_order)
        .service(purchase_orders::receive_purchase_order)
        .service(purchase_orders::pay_purchase_order)
        .service(purchase_orders::cancel_purchase_order)
        .service(sales::list_sales)
        .service(sales::show_sale)
        .service(sales::checkout)
        .service(sales::print_sale)
        .service(stock_receipts::list_stock_receipts)
        .service(stock_receipts::show_stock_receipt)
        .service(stock_receipts::add_stock_receipt)
        .service(activities::list_activities)
        .service(menus::list_menus)
        .service(menus::add_menu)
        .service(menus::edit_menu)
        .service(menus::list_menu_categories)
        .service(menus::add_menu_category)
        .service(analytics::product_analytics)
        .service(analytics::sales_summary)
        .service(sync::show_sync_status)
        .service(sync::set_sync_status)
        .service(receipts::print_receipt);
}

/// Map a service failure to its HTTP status. Only unexpected failures are
/// logged.
pub(crate) fn error_response(err: ServiceError, action: &str) -> HttpResponse {
    match err {
        ServiceError::Form(message) => {
            HttpResponse::UnprocessableEntity().json(ErrorBody { error: &message })
        }
        ServiceError::NotFound => HttpResponse::NotFound().finish(),
        ServiceError::Conflict => HttpResponse::Conflict().finish(),
        err => {
            log::error!("Failed to {action}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub(crate) fn json_response<T: Serialize>(result: ServiceResult<T>, action: &str) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(err, action),
    }
}

/// Like [`json_response`] but flags the store as having unsynced changes.
pub(crate) fn write_response<T: Serialize>(
    result: ServiceResult<T>,
    sync_state: &SyncState,
    action: &str,
) -> HttpResponse {
    match result {
        Ok(value) => {
            sync_state.mark_dirty();
            HttpResponse::Ok().json(value)
        }
        Err(err) => error_response(err, action),
    }
}

/// [`write_response`] answering `201 Created`.
pub(crate) fn created_response<T: Serialize>(
    result: ServiceResult<T>,
    sync_state: &SyncState,
    action: &str,
) -> HttpResponse {
    match result {
        Ok(value) => {
            sync_state.mark_dirty();
            HttpResponse::Created().json(value)
        }
        Err(err) => error_response(err, action),
    }
}
