use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::game::lobby::GetStats;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    connections: usize,
    queued: usize,
    active_sessions: usize,
    store: &'static str,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let stats = app_state
        .lobby
        .send(GetStats)
        .await
        .map_err(|err| AppError::internal(format!("lobby unavailable: {err}")))?;

    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        connections: stats.connections,
        queued: stats.queued,
        active_sessions: stats.sessions,
        store: app_state.store.kind(),
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
