use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::suppliers::{AddSupplierForm, EditSupplierForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::suppliers;
use crate::sync::SyncState;

#[get("/suppliers")]
pub async fn list_suppliers(
    params: web::Query<suppliers::SuppliersQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        suppliers::list_suppliers(repo.get_ref(), &station, params.into_inner()),
        "list suppliers",
    )
}

#[get("/suppliers/{supplier_id}")]
pub async fn show_supplier(
    supplier_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        suppliers::get_supplier(repo.get_ref(), &station, supplier_id.into_inner()),
        "load supplier",
    )
}

#[post("/suppliers")]
pub async fn add_supplier(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddSupplierForm>,
) -> impl Responder {
    created_response(
        suppliers::create_supplier(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create supplier",
    )
}

#[post("/suppliers/{supplier_id}")]
pub async fn edit_supplier(
    supplier_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditSupplierForm>,
) -> impl Responder {
    write_response(
        suppliers::update_supplier(
            repo.get_ref(),
            &station,
            supplier_id.into_inner(),
            form.into_inner(),
        ),
        &sync_state,
        "update supplier",
    )
}
