use actix_web::{Responder, get, post, web};
use chrono::Local;

use crate::domain::station::Station;
use crate::forms::sales::CheckoutForm;
use crate::printer::ReceiptPrinter;
use crate::repository::DieselRepository;
use crate::routes::{created_response, error_response, json_response, receipts};
use crate::services::{receipts as receipt_service, sales};
use crate::sync::SyncState;

#[get("/sales")]
pub async fn list_sales(
    params: web::Query<sales::SalesQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        sales::list_sales(repo.get_ref(), &station, params.into_inner()),
        "list sales",
    )
}

#[get("/sales/{sale_id}")]
pub async fn show_sale(
    sale_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        sales::get_sale(repo.get_ref(), &station, sale_id.into_inner()),
        "load sale",
    )
}

#[post("/sales")]
pub async fn checkout(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<CheckoutForm>,
) -> impl Responder {
    created_response(
        sales::checkout(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "check out",
    )
}

#[post("/sales/{sale_id}/print")]
pub async fn print_sale(
    sale_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    printer: Option<web::Data<dyn ReceiptPrinter>>,
) -> impl Responder {
    match receipt_service::receipt_for_sale(
        repo.get_ref(),
        &station,
        sale_id.into_inner(),
        Local::now().naive_local(),
    ) {
        Ok(receipt) => receipts::print(printer, receipt).await,
        Err(err) => error_response(err, "load sale receipt"),
    }
}
