#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod state;
pub mod store;
pub mod trace_ctx;

pub use auth::claims::IdentityClaim;
pub use auth::jwt::{issue_token, verify_token};
pub use error::AppError;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::DocumentStore;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
