// Library crate for the Introspens portal server
// This file exposes the public API for integration tests

pub mod activity;
pub mod app;
pub mod config;
pub mod content;
pub mod ranking;
pub mod session;
pub mod shared;
pub mod stats;
pub mod trazos;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use app::build_router;
pub use config::AppConfig;
pub use shared::{AppError, AppState};
pub use trazos::{compute_trazos, ActivityType};
