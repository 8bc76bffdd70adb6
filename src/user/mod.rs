pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use handlers::{admin_update_rank, admin_update_role, get_profile, update_profile};
pub use repository::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
