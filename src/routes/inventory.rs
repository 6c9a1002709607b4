use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::inventory::{AddInventoryForm, EditInventoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::inventory;
use crate::sync::SyncState;

#[get("/inventory")]
pub async fn list_inventory(
    params: web::Query<inventory::InventoryQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        inventory::list_inventory(repo.get_ref(), &station, params.into_inner()),
        "list inventory",
    )
}

#[post("/inventory")]
pub async fn add_inventory(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddInventoryForm>,
) -> impl Responder {
    created_response(
        inventory::add_inventory(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "add inventory item",
    )
}

#[post("/inventory/{inventory_id}")]
pub async fn edit_inventory(
    inventory_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditInventoryForm>,
) -> impl Responder {
    write_response(
        inventory::update_inventory(
            repo.get_ref(),
            &station,
            inventory_id.into_inner(),
            form.into_inner(),
        ),
        &sync_state,
        "update inventory item",
    )
}
