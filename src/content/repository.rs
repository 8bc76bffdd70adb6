use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{AssignmentModel, NewAssignment, NewPost, PostKind, PostModel};
use crate::activity::Arista;
use crate::shared::AppError;

/// Trait for the news, announcement and assignment boards. Lists are newest first.
#[async_trait]
pub trait ContentRepository {
    async fn create_post(&self, kind: PostKind, post: &NewPost) -> Result<PostModel, AppError>;
    async fn list_posts(&self, kind: PostKind, limit: usize) -> Result<Vec<PostModel>, AppError>;
    async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<AssignmentModel, AppError>;
    async fn list_assignments(&self, limit: usize) -> Result<Vec<AssignmentModel>, AppError>;
}

#[derive(Debug, Default)]
struct ContentTables {
    posts: HashMap<PostKind, Vec<PostModel>>,
    assignments: Vec<AssignmentModel>,
    last_post_id: HashMap<PostKind, i32>,
    last_assignment_id: i32,
}

fn newest_first<T, F>(items: &[T], limit: usize, created: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> (chrono::DateTime<Utc>, i32),
{
    let mut items = items.to_vec();
    items.sort_by(|a, b| created(b).cmp(&created(a)));
    items.truncate(limit);
    items
}

/// In-memory implementation of ContentRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryContentRepository {
    tables: RwLock<ContentTables>,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    #[instrument(skip(self, post), fields(kind = kind.as_ref()))]
    async fn create_post(&self, kind: PostKind, post: &NewPost) -> Result<PostModel, AppError> {
        let mut tables = self.tables.write().await;

        let last_id = tables.last_post_id.entry(kind).or_default();
        *last_id += 1;
        let created = PostModel {
            id: *last_id,
            title: post.title.clone(),
            content: post.content.clone(),
            author_id: post.author_id,
            created_at: Utc::now(),
        };
        tables.posts.entry(kind).or_default().push(created.clone());

        debug!(post_id = created.id, "Post created in memory");
        Ok(created)
    }

    async fn list_posts(&self, kind: PostKind, limit: usize) -> Result<Vec<PostModel>, AppError> {
        let tables = self.tables.read().await;
        let posts = tables.posts.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
        Ok(newest_first(posts, limit, |p| (p.created_at, p.id)))
    }

    #[instrument(skip(self, assignment))]
    async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<AssignmentModel, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_assignment_id += 1;

        let created = AssignmentModel {
            id: tables.last_assignment_id,
            title: assignment.title.clone(),
            description: assignment.description.clone(),
            arista: assignment.arista,
            album: assignment.album.clone(),
            due_date: assignment.due_date,
            author_id: assignment.author_id,
            created_at: Utc::now(),
        };
        tables.assignments.push(created.clone());

        debug!(assignment_id = created.id, "Assignment created in memory");
        Ok(created)
    }

    async fn list_assignments(&self, limit: usize) -> Result<Vec<AssignmentModel>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.assignments, limit, |a| (a.created_at, a.id)))
    }
}

/// PostgreSQL implementation of content repository
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Content query failed");
    AppError::DatabaseError(e.to_string())
}

fn post_from_row(row: &PgRow) -> PostModel {
    PostModel {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
    }
}

fn assignment_from_row(row: &PgRow) -> Result<AssignmentModel, AppError> {
    let arista: String = row.get("arista");

    Ok(AssignmentModel {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        arista: Arista::from_str(&arista)
            .map_err(|_| AppError::DatabaseError(format!("Unknown arista '{}'", arista)))?,
        album: row.get("album"),
        due_date: row.get("due_date"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
    })
}

const ASSIGNMENT_COLUMNS: &str =
    "id, title, description, arista, album, due_date, author_id, created_at";

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    #[instrument(skip(self, post), fields(kind = kind.as_ref()))]
    async fn create_post(&self, kind: PostKind, post: &NewPost) -> Result<PostModel, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO {} (title, content, author_id) VALUES ($1, $2, $3) \
             RETURNING id, title, content, author_id, created_at",
            kind.table()
        ))
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(post_from_row(&row))
    }

    #[instrument(skip(self), fields(kind = kind.as_ref()))]
    async fn list_posts(&self, kind: PostKind, limit: usize) -> Result<Vec<PostModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT id, title, content, author_id, created_at FROM {} \
             ORDER BY created_at DESC, id DESC LIMIT $1",
            kind.table()
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.iter().map(post_from_row).collect())
    }

    #[instrument(skip(self, assignment))]
    async fn create_assignment(
        &self,
        assignment: &NewAssignment,
    ) -> Result<AssignmentModel, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO activities_to_do (title, description, arista, album, due_date, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(&assignment.title)
        .bind(&assignment.description)
        .bind(assignment.arista.as_ref())
        .bind(&assignment.album)
        .bind(assignment.due_date)
        .bind(assignment.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        assignment_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn list_assignments(&self, limit: usize) -> Result<Vec<AssignmentModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM activities_to_do \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(assignment_from_row).collect()
    }
}
