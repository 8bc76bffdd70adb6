use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{RankingEntry, RankingMetric},
    service::RankingService,
};
use crate::shared::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<usize>,
}

async fn ranking(
    state: &AppState,
    metric: RankingMetric,
    limit: Option<usize>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    let service = RankingService::new(
        Arc::clone(&state.user_repository),
        state.config.ranking_limit,
    );
    let leaderboard = service.leaderboard(metric, limit).await?;

    info!(entries = leaderboard.len(), "Leaderboard served");

    Ok(Json(leaderboard.into_entries()))
}

/// HTTP handler for the trazos leaderboard
///
/// GET /api/rankings/trazos?limit=
#[instrument(name = "rankings_by_trazos", skip(state))]
pub async fn rankings_by_trazos(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    ranking(&state, RankingMetric::Trazos, query.limit).await
}

/// HTTP handler for the word-count leaderboard
///
/// GET /api/rankings/words?limit=
#[instrument(name = "rankings_by_words", skip(state))]
pub async fn rankings_by_words(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<RankingEntry>>, AppError> {
    ranking(&state, RankingMetric::Words, query.limit).await
}
