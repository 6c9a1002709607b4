use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::purchase_orders::{PurchaseOrderForm, ReceivePurchaseOrderForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::purchase_orders;
use crate::sync::SyncState;

#[get("/purchase-orders")]
pub async fn list_purchase_orders(
    params: web::Query<purchase_orders::PurchaseOrdersQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        purchase_orders::list_purchase_orders(repo.get_ref(), &station, params.into_inner()),
        "list purchase orders",
    )
}

#[get("/purchase-orders/{order_id}")]
pub async fn show_purchase_order(
    order_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        purchase_orders::get_purchase_order(repo.get_ref(), &station, order_id.into_inner()),
        "load purchase order",
    )
}

#[post("/purchase-orders")]
pub async fn add_purchase_order(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<PurchaseOrderForm>,
) -> impl Responder {
    created_response(
        purchase_orders::create_purchase_order(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create purchase order",
    )
}

#[post("/purchase-orders/{order_id}")]
pub async fn edit_purchase_order(
    order_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<PurchaseOrderForm>,
) -> impl Responder {
    write_response(
        purchase_orders::update_purchase_order(
            repo.get_ref(),
            &station,
            order_id.into_inner(),
            form.into_inner(),
        ),
        &sync_state,
        "update purchase order",
    )
}

#[post("/purchase-orders/{order_id}/approve")]
pub async fn approve_purchase_order(
    order_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
) -> impl Responder {
    write_response(
        purchase_orders::approve_purchase_order(repo.get_ref(), &station, order_id.into_inner()),
        &sync_state,
        "approve purchase order",
    )
}

/// The body is optional; lines left out are received in full.
#[post("/purchase-orders/{order_id}/receive")]
pub async fn receive_purchase_order(
    order_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: Option<web::Json<ReceivePurchaseOrderForm>>,
) -> impl Responder {
    let form = form.map(web::Json::into_inner).unwrap_or_default();
    write_response(
        purchase_orders::receive_purchase_order(
            repo.get_ref(),
            &station,
            order_id.into_inner(),
            form,
        ),
        &sync_state,
        "receive purchase order",
    )
}

#[post("/purchase-orders/{order_id}/pay")]
pub async fn pay_purchase_order(
    order_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
) -> impl Responder {
    write_response(
        purchase_orders::pay_purchase_order(repo.get_ref(), &station, order_id.into_inner()),
        &sync_state,
        "mark purchase order paid",
    )
}

#[post("/purchase-orders/{order_id}/cancel")]
pub async fn cancel_purchase_order(
    order_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
) -> impl Responder {
    write_response(
        purchase_orders::cancel_purchase_order(repo.get_ref(), &station, order_id.into_inner()),
        &sync_state,
        "cancel purchase order",
    )
}
