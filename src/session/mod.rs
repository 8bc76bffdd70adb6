// Public API - what other modules can use
pub use handlers::{current_user, login, register};
pub use middleware::require_auth;
pub use token::TokenConfig;
pub use types::{CurrentUser, SessionClaims};

// Internal modules
mod handlers;
mod middleware;
mod token;
pub mod types;
