use serde::{Deserialize, Serialize};

use crate::shared::AppError;
use crate::user::models::{Role, UserModel};
use crate::user::types::UserResponse;

/// JWT claims structure identifying the logged-in member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub user_id: i32,
    pub signature: String,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

/// The authenticated member, reloaded from the repository on every request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserModel);

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.0.role == Role::Admin
    }

    pub fn ensure_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub signature: String,
}

/// Response for register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}
