use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use serde::Serialize;

use crate::domain::station::Station;
use crate::forms::products::{AddProductForm, EditProductForm, UploadProductsForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::products;
use crate::sync::SyncState;

#[derive(Serialize)]
struct ImportSummary {
    imported: usize,
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        products::list_products(repo.get_ref(), &station, params.into_inner()),
        "list products",
    )
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        products::get_product(repo.get_ref(), &station, product_id.into_inner()),
        "load product",
    )
}

#[post("/products")]
pub async fn add_product(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    created_response(
        products::create_product(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create product",
    )
}

#[post("/products/{product_id}")]
pub async fn edit_product(
    product_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    write_response(
        products::update_product(
            repo.get_ref(),
            &station,
            product_id.into_inner(),
            form.into_inner(),
        ),
        &sync_state,
        "update product",
    )
}

#[post("/products/upload")]
pub async fn upload_products(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    MultipartForm(form): MultipartForm<UploadProductsForm>,
) -> impl Responder {
    write_response(
        products::import_products(repo.get_ref(), &station, form)
            .map(|imported| ImportSummary { imported }),
        &sync_state,
        "import products",
    )
}
