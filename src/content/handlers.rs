use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::{
    models::{AssignmentModel, PostKind, PostModel},
    service::ContentService,
    types::{ContentListQuery, CreateAssignmentRequest, CreatePostRequest},
};
use crate::session::CurrentUser;
use crate::shared::{AppError, AppState};

fn service(state: &AppState) -> ContentService {
    ContentService::new(Arc::clone(&state.content_repository))
}

/// GET /api/news
#[instrument(name = "list_news", skip(state))]
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<Vec<PostModel>>, AppError> {
    Ok(Json(service(&state).list_posts(PostKind::News, query.limit).await?))
}

/// POST /api/news (admin)
#[instrument(name = "create_news", skip(state, current, request))]
pub async fn create_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostModel>), AppError> {
    let post = service(&state)
        .publish_post(PostKind::News, &current, request)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/announcements
#[instrument(name = "list_announcements", skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<Vec<PostModel>>, AppError> {
    Ok(Json(
        service(&state)
            .list_posts(PostKind::Announcement, query.limit)
            .await?,
    ))
}

/// POST /api/announcements (admin)
#[instrument(name = "create_announcement", skip(state, current, request))]
pub async fn create_announcement(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostModel>), AppError> {
    let post = service(&state)
        .publish_post(PostKind::Announcement, &current, request)
        .await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/activities-to-do
#[instrument(name = "list_assignments", skip(state))]
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(query): Query<ContentListQuery>,
) -> Result<Json<Vec<AssignmentModel>>, AppError> {
    Ok(Json(service(&state).list_assignments(query.limit).await?))
}

/// POST /api/activities-to-do (admin)
#[instrument(name = "create_assignment", skip(state, current, request))]
pub async fn create_assignment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentModel>), AppError> {
    let assignment = service(&state)
        .publish_assignment(&current, request)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}
