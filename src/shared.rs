use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::activity::{repository::ActivityRepository, service::ActivityService};
use crate::config::AppConfig;
use crate::content::repository::ContentRepository;
use crate::session::TokenConfig;
use crate::stats::StatsAggregator;
use crate::user::repository::UserRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub token_config: TokenConfig,
    pub user_repository: Arc<dyn UserRepository + Send + Sync>,
    pub content_repository: Arc<dyn ContentRepository + Send + Sync>,
    /// Long-lived so its per-user submission locks are shared across requests
    pub activity_service: Arc<ActivityService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        activity_repository: Arc<dyn ActivityRepository + Send + Sync>,
        content_repository: Arc<dyn ContentRepository + Send + Sync>,
    ) -> Self {
        let aggregator = StatsAggregator::new(activity_repository.clone(), user_repository.clone());
        let activity_service = Arc::new(ActivityService::new(
            activity_repository,
            aggregator,
        ));

        Self {
            token_config: TokenConfig::from_config(&config),
            config,
            user_repository,
            content_repository,
            activity_service,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::JwtError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
