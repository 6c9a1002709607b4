use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::station::Station;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::sync::{SyncOutcome, run_sync_pass};
use crate::sync::{SyncSnapshot, SyncState, SyncTransport};

#[derive(Debug, Deserialize)]
pub struct SyncStatusForm {
    pub online: bool,
}

#[derive(Serialize)]
struct SyncStatusResponse {
    #[serde(flatten)]
    state: SyncSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<SyncOutcome>,
}

#[get("/sync/status")]
pub async fn show_sync_status(sync_state: web::Data<SyncState>) -> impl Responder {
    HttpResponse::Ok().json(SyncStatusResponse {
        state: sync_state.snapshot(),
        outcome: None,
    })
}

/// Network connectivity report from the front-end. Coming online runs a
/// sync pass before answering.
#[post("/sync/status")]
pub async fn set_sync_status(
    station: web::Data<Station>,
    repo: web::Data<DieselRepository>,
    sync_state: web::Data<SyncState>,
    transport: Option<web::Data<dyn SyncTransport>>,
    form: web::Json<SyncStatusForm>,
) -> impl Responder {
    sync_state.set_online(form.online);
    if !form.online {
        return HttpResponse::Ok().json(SyncStatusResponse {
            state: sync_state.snapshot(),
            outcome: None,
        });
    }

    let state = sync_state.clone();
    let pass = web::block(move || {
        run_sync_pass(
            repo.get_ref(),
            &station,
            &state,
            transport.as_ref().map(|transport| transport.get_ref()),
        )
    })
    .await;

    match pass {
        Ok(Ok(outcome)) => HttpResponse::Ok().json(SyncStatusResponse {
            state: sync_state.snapshot(),
            outcome: Some(outcome),
        }),
        Ok(Err(err)) => error_response(err, "sync records"),
        Err(err) => {
            log::error!("Sync task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
