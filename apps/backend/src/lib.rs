#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;

// Re-exports for public API
pub use config::server::ServerConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use middleware::structured_logger::StructuredLogger;
pub use services::game_flow::GameFlowService;
pub use services::match_registry::MatchRegistry;
pub use services::notifier::Notifier;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
