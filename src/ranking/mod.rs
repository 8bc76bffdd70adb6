// Public API - what other modules can use
pub use handlers::{rankings_by_trazos, rankings_by_words};
pub use models::{order_users, Leaderboard, RankingEntry, RankingMetric};
pub use service::RankingService;

// Internal modules
mod handlers;
pub mod models;
mod service;
