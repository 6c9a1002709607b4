use actix_web::{Responder, get, post, web};

use crate::forms::locations::{AddLocationForm, EditLocationForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::locations;
use crate::sync::SyncState;

#[get("/locations")]
pub async fn list_locations(repo: web::Data<DieselRepository>) -> impl Responder {
    json_response(locations::list_locations(repo.get_ref()), "list locations")
}

#[post("/locations")]
pub async fn add_location(
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddLocationForm>,
) -> impl Responder {
    created_response(
        locations::create_location(repo.get_ref(), form.into_inner()),
        &sync_state,
        "create location",
    )
}

#[post("/locations/{location_id}")]
pub async fn edit_location(
    location_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditLocationForm>,
) -> impl Responder {
    write_response(
        locations::update_location(repo.get_ref(), location_id.into_inner(), form.into_inner()),
        &sync_state,
        "update location",
    )
}
