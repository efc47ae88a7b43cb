use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::domain::MatchSnapshot;
use crate::error::AppError;
use crate::services::registry::{MatchId, MatchSummary};
use crate::state::app_state::AppState;

#[derive(Serialize)]
struct LobbyResponse {
    matches: Vec<MatchSummary>,
}

#[derive(Serialize)]
struct SnapshotResponse {
    match_id: MatchId,
    version: u64,
    state: MatchSnapshot,
}

async fn list_matches(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(LobbyResponse {
        matches: app_state.registry.list_matches(),
    }))
}

async fn get_match(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let match_id = MatchId::from(path.into_inner());
    let (version, state) = app_state.registry.snapshot(&match_id)?;
    Ok(HttpResponse::Ok().json(SnapshotResponse {
        match_id,
        version,
        state: state.for_viewer(None),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_matches))
        .route("/{match_id}", web::get().to(get_match));
}
