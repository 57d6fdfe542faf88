use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use rps_backend::config::{database_url, GameConfig};
use rps_backend::infra::db::connect_db;
use rps_backend::middleware::cors::cors_middleware;
use rps_backend::middleware::request_trace::RequestTrace;
use rps_backend::middleware::structured_logger::StructuredLogger;
use rps_backend::repos::{InMemoryMatchStore, MatchStore, SeaMatchStore};
use rps_backend::routes;
use rps_backend::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid game configuration");
            std::process::exit(1);
        }
    };

    let store: Arc<dyn MatchStore> = match database_url() {
        Some(url) => match connect_db(&url).await {
            Ok(db) => Arc::new(SeaMatchStore::new(db)),
            Err(e) => {
                error!(error = %e, "failed to connect to DATABASE_URL");
                std::process::exit(1);
            }
        },
        None => Arc::new(InMemoryMatchStore::new()),
    };

    info!(
        host = %host,
        port,
        store = store.kind(),
        max_rounds = config.max_rounds,
        round_timeout_ms = config.round_timeout.as_millis() as u64,
        "starting rps backend"
    );

    let data = web::Data::new(AppState::start(config, store));

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
