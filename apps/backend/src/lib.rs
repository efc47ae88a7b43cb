#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod ws;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::server::ServerConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use services::registry::{MatchId, MatchRegistry, MatchSummary, RegistryConfig};
pub use state::app_state::AppState;
pub use ws::hub::ConnectionHub;
pub use ws::protocol::{ClientMsg, ServerMsg};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
