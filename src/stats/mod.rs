//! Per-user cumulative totals derived from the activity history.

mod aggregator;
mod errors;
pub mod models;

pub use aggregator::StatsAggregator;
pub use errors::StatsError;
pub use models::UserStats;
