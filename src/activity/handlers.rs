use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, instrument};

use super::{
    albums::albums_for_label,
    models::ActivityModel,
    types::{ActivityListQuery, CalculateTrazosRequest, CalculateTrazosResponse, CreateActivityRequest},
};
use crate::session::CurrentUser;
use crate::shared::{AppError, AppState};

/// HTTP handler for submitting an activity
///
/// POST /api/activities
/// The activity always belongs to the logged-in member. Responds once the member's
/// totals already include it.
#[instrument(name = "create_activity", skip(state, current, request), fields(user_id = current.0.id))]
pub async fn create_activity(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityModel>), AppError> {
    let activity = state
        .activity_service
        .submit_activity(current.0.id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

/// GET /api/activities/user/:id?limit=
#[instrument(name = "list_user_activities", skip(state))]
pub async fn list_user_activities(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<ActivityListQuery>,
) -> Result<Json<Vec<ActivityModel>>, AppError> {
    let activities = state
        .activity_service
        .get_user_activities(user_id, query.limit)
        .await?;

    info!(count = activities.len(), "Activities listed");
    Ok(Json(activities))
}

/// HTTP handler previewing the trazos an activity would earn
///
/// POST /api/calculate-trazos
#[instrument(name = "calculate_trazos", skip(state))]
pub async fn calculate_trazos(
    State(state): State<AppState>,
    Json(request): Json<CalculateTrazosRequest>,
) -> Result<Json<CalculateTrazosResponse>, AppError> {
    let trazos = state.activity_service.preview_trazos(&request)?;
    Ok(Json(CalculateTrazosResponse { trazos }))
}

/// GET /api/albums/:arista
pub async fn list_albums(Path(arista): Path<String>) -> Json<Vec<&'static str>> {
    Json(albums_for_label(&arista).to_vec())
}
