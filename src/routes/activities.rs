use actix_web::{Responder, get, web};

use crate::domain::station::Station;
use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::activities;

#[get("/activities")]
pub async fn list_activities(
    params: web::Query<activities::ActivitiesQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        activities::list_activities(repo.get_ref(), &station, params.into_inner()),
        "list activities",
    )
}
