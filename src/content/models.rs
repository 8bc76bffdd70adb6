use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::activity::Arista;

/// The two title/content boards. Each maps to its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum PostKind {
    News,
    Announcement,
}

impl PostKind {
    pub fn table(&self) -> &'static str {
        match self {
            PostKind::News => "news",
            PostKind::Announcement => "announcements",
        }
    }

    pub fn default_limit(&self) -> usize {
        10
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostModel {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

/// An "activity to do" published by the admins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentModel {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub arista: Arista,
    pub album: String,
    pub due_date: Option<NaiveDate>,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: String,
    pub description: String,
    pub arista: Arista,
    pub album: String,
    pub due_date: Option<NaiveDate>,
    pub author_id: i32,
}

pub const DEFAULT_ASSIGNMENT_LIMIT: usize = 20;
