#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod test_support;
pub mod trace_ctx;
pub mod ws;

// Re-exports for public API
pub use error::AppError;
pub use errors::domain::DomainError;
pub use infra::game_locks::GameLocks;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use services::game_flow::GameFlowService;
pub use state::app_state::AppState;
pub use store::{MemoryStore, Store};
pub use ws::hub::{Broadcaster, GameHub};

// Prelude for test convenience
pub mod prelude {
    pub use super::domain::*;
    pub use super::entities::*;
    pub use super::error::*;
    pub use super::errors::domain::*;
    pub use super::infra::*;
    pub use super::middleware::*;
    pub use super::state::*;
    pub use super::store::*;
    pub use super::ws::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
