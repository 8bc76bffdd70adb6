use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{error, info, instrument, warn};

use super::{
    models::{ActivityModel, NewActivity},
    repository::ActivityRepository,
    types::{CalculateTrazosRequest, CreateActivityRequest},
};
use crate::shared::AppError;
use crate::stats::StatsAggregator;
use crate::trazos::{compute_trazos, compute_trazos_for_label};

pub const DEFAULT_ACTIVITY_LIMIT: usize = 50;

/// Submits activities and keeps the owner's totals in step with them
pub struct ActivityService {
    repository: Arc<dyn ActivityRepository + Send + Sync>,
    aggregator: StatsAggregator,
    user_mutexes: Arc<RwLock<HashMap<i32, Arc<AsyncMutex<()>>>>>,
}

impl ActivityService {
    pub fn new(
        repository: Arc<dyn ActivityRepository + Send + Sync>,
        aggregator: StatsAggregator,
    ) -> Self {
        Self {
            repository,
            aggregator,
            user_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Validate, score, store, then recompute the owner's totals before returning.
    ///
    /// Stores with transactions write the activity and the totals together. Otherwise
    /// submissions by the same member run one at a time, and a failed recompute removes
    /// the stored activity again. If that removal fails too, the recompute is retried so
    /// the totals count the activity that stayed behind.
    #[instrument(skip(self, request), fields(activity_type = %request.activity_type))]
    pub async fn submit_activity(
        &self,
        user_id: i32,
        request: CreateActivityRequest,
    ) -> Result<ActivityModel, AppError> {
        let new_activity = validate_submission(user_id, request)?;

        let user_lock = self.user_lock(user_id).await;
        let _guard = user_lock.lock().await;

        if let Some((activity, stats)) = self
            .repository
            .create_activity_with_stats(&new_activity)
            .await?
        {
            info!(
                activity_id = activity.id,
                trazos = activity.trazos,
                total_trazos = stats.total_trazos,
                "Activity submitted"
            );
            return Ok(activity);
        }

        let activity = self.repository.create_activity(&new_activity).await?;

        if let Err(stats_error) = self.aggregator.recompute_stats(user_id).await {
            error!(
                activity_id = activity.id,
                error = %stats_error,
                "Stats recompute failed, removing activity"
            );
            return self.undo_submission(activity, stats_error.into()).await;
        }

        info!(
            activity_id = activity.id,
            trazos = activity.trazos,
            words = activity.words,
            "Activity submitted"
        );
        Ok(activity)
    }

    async fn undo_submission(
        &self,
        activity: ActivityModel,
        cause: AppError,
    ) -> Result<ActivityModel, AppError> {
        let cleanup_error = match self.repository.delete_activity(activity.id).await {
            Ok(_) => return Err(cause),
            Err(e) => e,
        };
        error!(
            activity_id = activity.id,
            error = %cleanup_error,
            "Failed to remove activity after stats failure, retrying recompute"
        );

        match self.aggregator.recompute_stats(activity.user_id).await {
            Ok(_) => {
                warn!(activity_id = activity.id, "Activity kept and counted on retry");
                Ok(activity)
            }
            Err(retry_error) => {
                // The stored activity stays uncounted until the next full recompute
                error!(
                    activity_id = activity.id,
                    error = %retry_error,
                    "Stats retry failed, totals are stale"
                );
                Err(retry_error.into())
            }
        }
    }

    /// Scores without storing anything
    pub fn preview_trazos(&self, request: &CalculateTrazosRequest) -> Result<u32, AppError> {
        let words = non_negative("words", request.words)?;
        let responses = request
            .responses
            .map(|r| non_negative("responses", r))
            .transpose()?;
        Ok(compute_trazos_for_label(
            &request.activity_type,
            words,
            responses,
        ))
    }

    pub async fn get_user_activities(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityModel>, AppError> {
        self.repository
            .get_user_activities(user_id, Some(limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT)))
            .await
    }

    async fn user_lock(&self, user_id: i32) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.user_mutexes.read().await;
            if let Some(lock) = guard.get(&user_id) {
                return lock.clone();
            }
        }

        let mut guard = self.user_mutexes.write().await;
        guard
            .entry(user_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32, AppError> {
    u32::try_from(value)
        .ok()
        .filter(|v| i32::try_from(*v).is_ok())
        .ok_or_else(|| {
            warn!(field, value, "Rejected count");
            AppError::Validation(format!("{} must be a non-negative integer", field))
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_submission(
    user_id: i32,
    request: CreateActivityRequest,
) -> Result<NewActivity, AppError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let words = non_negative("words", request.words)?;
    let responses = non_negative("responses", request.responses.unwrap_or_default())?;

    let album = request.album.trim().to_string();
    if !request.arista.has_album(&album) {
        return Err(AppError::Validation(format!(
            "Album '{}' does not belong to {}",
            album,
            request.arista.as_ref()
        )));
    }

    Ok(NewActivity {
        user_id,
        name,
        date: request.date,
        words,
        activity_type: request.activity_type,
        responses,
        link: non_blank(request.link),
        description: non_blank(request.description),
        arista: request.arista,
        album,
        trazos: compute_trazos(request.activity_type, words, responses),
    })
}
