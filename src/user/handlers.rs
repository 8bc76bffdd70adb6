use axum::{
    extract::{Path, State},
    Extension, Json,
};
use tracing::{info, instrument};

use super::{
    service::UserService,
    types::{AdminRankRequest, AdminRoleRequest, AdminUpdateResponse, ProfileUpdateRequest, UserResponse},
};
use crate::session::CurrentUser;
use crate::shared::{AppError, AppState};

/// HTTP handler for viewing a member profile
///
/// GET /api/profile/:id
#[instrument(name = "get_profile", skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::from_state(&state).get_profile(user_id).await?;
    Ok(Json(user.into()))
}

/// HTTP handler for editing the logged-in member's profile
///
/// PATCH /api/profile
#[instrument(name = "update_profile", skip(state, current, request))]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::from_state(&state)
        .update_profile(&current, request)
        .await?;
    Ok(Json(user.into()))
}

/// POST /api/admin/update-role
#[instrument(name = "admin_update_role", skip(state, current), fields(admin_id = current.0.id))]
pub async fn admin_update_role(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<AdminRoleRequest>,
) -> Result<Json<AdminUpdateResponse>, AppError> {
    current.ensure_admin()?;

    let user = UserService::from_state(&state)
        .set_role_by_signature(&request.signature, request.role)
        .await?;
    info!(user_id = user.id, "Admin changed member role");

    Ok(Json(AdminUpdateResponse {
        message: format!("Rol de {} actualizado a {}", user.signature, user.role.as_ref()),
        user: user.into(),
    }))
}

/// POST /api/admin/update-rank
#[instrument(name = "admin_update_rank", skip(state, current), fields(admin_id = current.0.id))]
pub async fn admin_update_rank(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<AdminRankRequest>,
) -> Result<Json<AdminUpdateResponse>, AppError> {
    current.ensure_admin()?;

    let user = UserService::from_state(&state)
        .set_rank_by_signature(&request.signature, request.rank)
        .await?;
    info!(user_id = user.id, "Admin changed member rank");

    Ok(Json(AdminUpdateResponse {
        message: format!("Rango de {} actualizado a {}", user.signature, user.rank.as_ref()),
        user: user.into(),
    }))
}
