//! Activity submission: validation, scoring, storage and the stats refresh that follows.

pub mod albums;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use albums::Arista;
pub use handlers::{calculate_trazos, create_activity, list_albums, list_user_activities};
pub use repository::{ActivityRepository, InMemoryActivityRepository, PostgresActivityRepository};
pub use service::ActivityService;
