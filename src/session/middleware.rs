use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, warn};

use super::types::CurrentUser;
use crate::shared::{AppError, AppState};

/// JWT authentication middleware - validates the Authorization Bearer header, reloads the
/// member and adds `CurrentUser` to the request.
/// Usage: .route_layer(middleware::from_fn_with_state(app_state.clone(), session::require_auth))
/// Handlers can then extract Extension(current_user): Extension<CurrentUser>.
#[instrument(skip(state, req, next), fields(uri = %req.uri()))]
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing Authorization header in request");
            AppError::Unauthorized("Authentication required".to_string())
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Invalid Authorization header format (expected Bearer token)");
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let claims = state.token_config.validate_token(token).map_err(|e| {
        warn!("JWT authentication failed: {}", e);
        e
    })?;

    // The role may have changed since the token was issued
    let user = state
        .user_repository
        .get_user(claims.user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = claims.user_id, "Token refers to a member that no longer exists");
            AppError::Unauthorized("Member not found".to_string())
        })?;

    debug!(
        user_id = user.id,
        signature = %user.signature,
        "Authentication successful, adding member to request"
    );

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}
