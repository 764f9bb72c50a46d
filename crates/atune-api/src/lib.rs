//! Axum HTTP API server.
//!
//! This crate provides:
//! - Trajectory analysis for observations detected elsewhere
//! - Full video analysis for files on the server
//! - Health, welcome and schema endpoints
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
