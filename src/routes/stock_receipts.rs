use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::stock_receipts::AddStockReceiptForm;
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response};
use crate::services::stock_receipts;
use crate::sync::SyncState;

#[get("/stock-receipts")]
pub async fn list_stock_receipts(
    params: web::Query<stock_receipts::StockReceiptsQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        stock_receipts::list_stock_receipts(repo.get_ref(), &station, params.into_inner()),
        "list stock receipts",
    )
}

#[get("/stock-receipts/{receipt_id}")]
pub async fn show_stock_receipt(
    receipt_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        stock_receipts::get_stock_receipt(repo.get_ref(), &station, receipt_id.into_inner()),
        "load stock receipt",
    )
}

#[post("/stock-receipts")]
pub async fn add_stock_receipt(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddStockReceiptForm>,
) -> impl Responder {
    created_response(
        stock_receipts::create_stock_receipt(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "record stock receipt",
    )
}
