use actix_web::{Responder, get, post, web};

use crate::domain::station::Station;
use crate::forms::customers::{AddCustomerForm, EditCustomerForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, write_response};
use crate::services::customers;
use crate::sync::SyncState;

#[get("/customers")]
pub async fn list_customers(
    params: web::Query<customers::CustomersQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        customers::list_customers(repo.get_ref(), &station, params.into_inner()),
        "list customers",
    )
}

#[get("/customers/{customer_id}")]
pub async fn show_customer(
    customer_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        customers::get_customer(repo.get_ref(), &station, customer_id.into_inner()),
        "load customer",
    )
}

#[post("/customers")]
pub async fn add_customer(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<AddCustomerForm>,
) -> impl Responder {
    created_response(
        customers::create_customer(repo.get_ref(), &station, form.into_inner()),
        &sync_state,
        "create customer",
    )
}

#[post("/customers/{customer_id}")]
pub async fn edit_customer(
    customer_id: web::Path<i32>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    form: web::Json<EditCustomerForm>,
) -> impl Responder {
    write_response(
        customers::update_customer(
            repo.get_ref(),
            &station,
            customer_id.into_inner(),
            form.into_inner(),
        ),
        &sync_state,
        "update customer",
    )
}
