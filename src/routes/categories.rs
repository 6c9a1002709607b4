use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::categories;
use crate::sync::SyncState;

#[get("/categories")]
pub async fn list_categories(
    params: web::Query<categories::CategoriesQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        categories::list_categories(repo.get_ref(), &station, params.into_inner()),
        "list categories",
    )
}

#[post("/categories")]
pub async fn add_category(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    created_response(
        categories::create_category(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create category",
    )
}

#[post("/categories/{category_id}")]
pub async fn edit_category(
    category_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditCategoryForm>,
) -> impl Responder {
    write_response(
        categories::update_category(
            repo.get_ref(),
            &station,
            category_id.into_inner(),
            form.into_inner(),
        ),
        &sync_state,
        "update category",
    )
}
