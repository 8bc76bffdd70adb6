use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{models::UserStats, StatsError};
use crate::activity::repository::ActivityRepository;
use crate::shared::AppError;
use crate::user::repository::UserRepository;

/// Keeps the materialized totals on a user record equal to the sums over that user's
/// activities. Always recomputes from the full activity set; never applies deltas.
#[derive(Clone)]
pub struct StatsAggregator {
    activity_repository: Arc<dyn ActivityRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl StatsAggregator {
    pub fn new(
        activity_repository: Arc<dyn ActivityRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        Self {
            activity_repository,
            user_repository,
        }
    }

    /// Recomputes and stores `user_id`'s totals. Touches no other user.
    #[instrument(skip(self))]
    pub async fn recompute_stats(&self, user_id: i32) -> Result<UserStats, StatsError> {
        let activities = self
            .activity_repository
            .get_user_activities(user_id, None)
            .await
            .map_err(|e| StatsError::Repository(e.to_string()))?;

        let stats = UserStats::from_activities(&activities);
        debug!(
            user_id,
            total_trazos = stats.total_trazos,
            total_words = stats.total_words,
            total_activities = stats.total_activities,
            "Recomputed user stats"
        );

        self.user_repository
            .update_user_stats(user_id, &stats)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => StatsError::UserNotFound(user_id),
                other => {
                    warn!(user_id, error = %other, "Failed to store user stats");
                    StatsError::Repository(other.to_string())
                }
            })?;

        info!(user_id, total_trazos = stats.total_trazos, "User stats refreshed");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::models::NewActivity;
    use crate::activity::repository::InMemoryActivityRepository;
    use crate::shared::test_utils::sample_new_user;
    use crate::trazos::ActivityType;
    use crate::user::repository::InMemoryUserRepository;

    fn activity(user_id: i32, activity_type: ActivityType, words: u32, trazos: u32) -> NewActivity {
        let mut new_activity = NewActivity::sample(user_id);
        new_activity.activity_type = activity_type;
        new_activity.words = words;
        new_activity.trazos = trazos;
        new_activity
    }

    async fn setup() -> (
        StatsAggregator,
        Arc<InMemoryActivityRepository>,
        Arc<InMemoryUserRepository>,
    ) {
        let activities = Arc::new(InMemoryActivityRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let aggregator = StatsAggregator::new(activities.clone(), users.clone());
        (aggregator, activities, users)
    }

    #[tokio::test]
    async fn test_recompute_folds_every_activity() {
        let (aggregator, activities, users) = setup().await;
        let user = users.create_user(&sample_new_user("#pluma")).await.unwrap();

        activities
            .create_activity(&activity(user.id, ActivityType::Narrativa, 750, 400))
            .await
            .unwrap();
        activities
            .create_activity(&activity(user.id, ActivityType::Poemas, 120, 150))
            .await
            .unwrap();

        let stats = aggregator.recompute_stats(user.id).await.unwrap();
        assert_eq!(
            stats,
            UserStats {
                total_trazos: 550,
                total_words: 870,
                total_activities: 2
            }
        );

        let stored = users.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(stored.stats(), stats);
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let (aggregator, activities, users) = setup().await;
        let user = users.create_user(&sample_new_user("#pluma")).await.unwrap();
        activities
            .create_activity(&activity(user.id, ActivityType::Rol, 0, 700))
            .await
            .unwrap();

        let first = aggregator.recompute_stats(user.id).await.unwrap();
        let second = aggregator.recompute_stats(user.id).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_recompute_overwrites_drifted_totals() {
        let (aggregator, activities, users) = setup().await;
        let user = users.create_user(&sample_new_user("#pluma")).await.unwrap();
        activities
            .create_activity(&activity(user.id, ActivityType::Collage, 10, 150))
            .await
            .unwrap();

        let drifted = UserStats {
            total_trazos: 9_999,
            total_words: 1,
            total_activities: 42,
        };
        users.update_user_stats(user.id, &drifted).await.unwrap();

        let stats = aggregator.recompute_stats(user.id).await.unwrap();
        assert_eq!(stats.total_trazos, 150);
        assert_eq!(stats.total_activities, 1);
    }

    #[tokio::test]
    async fn test_recompute_leaves_other_users_alone() {
        let (aggregator, activities, users) = setup().await;
        let author = users.create_user(&sample_new_user("#autora")).await.unwrap();
        let bystander = users.create_user(&sample_new_user("#testigo")).await.unwrap();

        activities
            .create_activity(&activity(author.id, ActivityType::Pinturas, 0, 200))
            .await
            .unwrap();
        activities
            .create_activity(&activity(bystander.id, ActivityType::Pinturas, 0, 200))
            .await
            .unwrap();

        aggregator.recompute_stats(author.id).await.unwrap();

        let untouched = users.get_user(bystander.id).await.unwrap().unwrap();
        assert_eq!(untouched.stats(), UserStats::default());
    }

    #[tokio::test]
    async fn test_user_without_activities_has_zero_totals() {
        let (aggregator, _, users) = setup().await;
        let user = users.create_user(&sample_new_user("#pluma")).await.unwrap();

        let stats = aggregator.recompute_stats(user.id).await.unwrap();
        assert_eq!(stats, UserStats::default());
    }

    #[tokio::test]
    async fn test_missing_user() {
        let (aggregator, _, _) = setup().await;
        let result = aggregator.recompute_stats(404).await;
        assert!(matches!(result, Err(StatsError::UserNotFound(404))));
    }
}
