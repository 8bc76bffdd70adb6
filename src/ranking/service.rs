use std::sync::Arc;
use tracing::{debug, instrument};

use super::models::{Leaderboard, RankingMetric};
use crate::shared::AppError;
use crate::user::repository::UserRepository;

/// Upper bound for a caller-supplied leaderboard size
pub const MAX_RANKING_LIMIT: usize = 100;

/// Read-only leaderboards over the materialized user totals
pub struct RankingService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    default_limit: usize,
}

impl RankingService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>, default_limit: usize) -> Self {
        Self {
            repository,
            default_limit,
        }
    }

    /// A caller-supplied `limit` of 0 is rejected; larger values are capped.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        metric: RankingMetric,
        limit: Option<usize>,
    ) -> Result<Leaderboard, AppError> {
        let limit = match limit {
            Some(0) => {
                return Err(AppError::Validation(
                    "limit must be at least 1".to_string(),
                ))
            }
            Some(limit) => limit.min(MAX_RANKING_LIMIT),
            None => self.default_limit.clamp(1, MAX_RANKING_LIMIT),
        };

        let users = self.repository.get_users_ordered_by(metric, limit).await?;
        debug!(count = users.len(), limit, "Leaderboard loaded");

        Ok(Leaderboard::from_ordered(metric, users))
    }
}
