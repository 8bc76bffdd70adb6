use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("User {0} not found")]
    UserNotFound(i32),
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Repository(msg) => AppError::DatabaseError(msg),
            StatsError::UserNotFound(user_id) => {
                AppError::NotFound(format!("User {} not found", user_id))
            }
        }
    }
}
