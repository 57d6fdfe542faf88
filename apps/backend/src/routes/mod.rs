use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every route. Middleware is applied by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.configure(realtime::configure_routes);
}
