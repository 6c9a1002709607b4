use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::menus::{AddMenuCategoryForm, AddMenuForm, EditMenuForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::menus;
use crate::sync::SyncState;

#[get("/menus")]
pub async fn list_menus(
    params: web::Query<menus::MenusQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        menus::list_menus(repo.get_ref(), &station, params.into_inner()),
        "list menus",
    )
}

#[post("/menus")]
pub async fn add_menu(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddMenuForm>,
) -> impl Responder {
    created_response(
        menus::create_menu(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create menu item",
    )
}

#[post("/menus/{menu_id}")]
pub async fn edit_menu(
    menu_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditMenuForm>,
) -> impl Responder {
    write_response(
        menus::update_menu(repo.get_ref(), &station, menu_id.into_inner(), form.into_inner()),
        &sync_state,
        "update menu item",
    )
}

#[get("/menu-categories")]
pub async fn list_menu_categories(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        menus::list_menu_categories(repo.get_ref(), &station),
        "list menu categories",
    )
}

#[post("/menu-categories")]
pub async fn add_menu_category(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddMenuCategoryForm>,
) -> impl Responder {
    created_response(
        menus::create_menu_category(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create menu category",
    )
}
