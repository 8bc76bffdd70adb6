//! News, announcements and the assignment board.

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;

pub use handlers::{
    create_announcement, create_assignment, create_news, list_announcements, list_assignments,
    list_news,
};
pub use repository::{ContentRepository, InMemoryContentRepository, PostgresContentRepository};
