use actix_web::{Responder, get, web};
use chrono::Local;

use crate::domain::station::Station;
use crate::forms::transactions::TransactionFilterForm;
use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::transactions;

#[get("/transactions")]
pub async fn list_transactions(
    params: web::Query<TransactionFilterForm>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let today = Local::now().naive_utc().date();
    json_response(
        transactions::list_transactions(repo.get_ref(), &station, params.into_inner(), today),
        "list transactions",
    )
}
