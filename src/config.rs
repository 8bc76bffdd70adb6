use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ADMIN_SIGNATURE: &str = "#INELUDIBLE";
pub const DEFAULT_RANKING_LIMIT: usize = 20;
pub const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;
const DEFAULT_JWT_SECRET: &str = "introspens-secret-change-in-production";

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    /// When set, PostgreSQL repositories are used instead of the in-memory ones
    pub database_url: Option<String>,
    /// Registering with this signature creates an admin account
    pub admin_signature: String,
    pub ranking_limit: usize,
    pub jwt_secret: String,
    pub session_expiration_days: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            admin_signature: std::env::var("ADMIN_SIGNATURE")
                .unwrap_or_else(|_| DEFAULT_ADMIN_SIGNATURE.to_string()),
            ranking_limit: parse_env("RANKING_LIMIT", DEFAULT_RANKING_LIMIT),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            session_expiration_days: parse_env(
                "SESSION_EXPIRATION_DAYS",
                DEFAULT_SESSION_EXPIRATION_DAYS,
            ),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            admin_signature: DEFAULT_ADMIN_SIGNATURE.to_string(),
            ranking_limit: DEFAULT_RANKING_LIMIT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            session_expiration_days: DEFAULT_SESSION_EXPIRATION_DAYS,
        }
    }
}

fn parse_env<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "Invalid value in environment, using default");
            default
        }),
        Err(_) => default,
    }
}
