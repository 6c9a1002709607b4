use actix_web::{Responder, get, web};
use chrono::Local;

use crate::domain::station::Station;
use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::analytics::{self, AnalyticsQuery};

/// `?days=` sets the prediction window, `?months=` the trend history.
#[get("/analytics/products/{product_id}")]
pub async fn product_analytics(
    product_id: web::Path<i32>,
    params: web::Query<AnalyticsQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        analytics::product_analytics(
            repo.get_ref(),
            &station,
            product_id.into_inner(),
            params.into_inner(),
            Local::now().naive_utc(),
        ),
        "compute product analytics",
    )
}

#[get("/analytics/sales")]
pub async fn sales_summary(
    params: web::Query<AnalyticsQuery>,
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        analytics::sales_summary(
            repo.get_ref(),
            &station,
            params.into_inner(),
            Local::now().naive_utc(),
        ),
        "summarize sales",
    )
}
