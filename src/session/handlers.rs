use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::{info, instrument};

use super::types::{CurrentUser, LoginRequest, SessionResponse};
use crate::shared::{AppError, AppState};
use crate::user::service::UserService;
use crate::user::types::{RegisterRequest, UserResponse};

/// HTTP handler for registering a new member
///
/// POST /api/register
/// Creates the member and returns a token so the client is logged in right away
#[instrument(name = "register", skip(state, request), fields(signature = %request.signature))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let service = UserService::from_state(&state);
    let user = service.register(request).await?;

    let token = state
        .token_config
        .create_token(user.id, user.signature.clone())?;

    info!(user_id = user.id, "Member registered and logged in");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// HTTP handler for signature login
///
/// POST /api/login
#[instrument(name = "login", skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let service = UserService::from_state(&state);
    let user = service.authenticate(&request.signature).await?;

    let token = state
        .token_config
        .create_token(user.id, user.signature.clone())?;

    info!(user_id = user.id, "Member logged in");

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// HTTP handler returning the logged-in member
///
/// GET /api/user
pub async fn current_user(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(current.0.into())
}
