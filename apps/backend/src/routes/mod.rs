use actix_web::web;

pub mod health;
pub mod realtime;

/// Configure application routes.
///
/// Shared by `main.rs` and the integration test server so both expose the
/// same paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.configure(health::configure_routes);

    // Realtime routes: /ws
    cfg.configure(realtime::configure_routes);
}
