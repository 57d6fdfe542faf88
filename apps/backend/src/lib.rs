#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod game;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod ws;


// Re-exports for public API
pub use config::GameConfig;
pub use error::AppError;
pub use game::{ConnId, Lobby, RoomId};
pub use infra::db::connect_db;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use repos::{InMemoryMatchStore, MatchStore, SeaMatchStore};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
