use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{
        AssignmentModel, NewAssignment, NewPost, PostKind, PostModel, DEFAULT_ASSIGNMENT_LIMIT,
    },
    repository::ContentRepository,
    types::{CreateAssignmentRequest, CreatePostRequest},
};
use crate::session::CurrentUser;
use crate::shared::AppError;

/// Reading is open to members; publishing needs an admin
pub struct ContentService {
    repository: Arc<dyn ContentRepository + Send + Sync>,
}

impl ContentService {
    pub fn new(repository: Arc<dyn ContentRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    pub async fn list_posts(
        &self,
        kind: PostKind,
        limit: Option<usize>,
    ) -> Result<Vec<PostModel>, AppError> {
        self.repository
            .list_posts(kind, limit.unwrap_or(kind.default_limit()))
            .await
    }

    #[instrument(skip(self, author, request), fields(kind = kind.as_ref(), author_id = author.0.id))]
    pub async fn publish_post(
        &self,
        kind: PostKind,
        author: &CurrentUser,
        request: CreatePostRequest,
    ) -> Result<PostModel, AppError> {
        author.ensure_admin()?;

        let post = NewPost {
            title: required("title", request.title)?,
            content: required("content", request.content)?,
            author_id: author.0.id,
        };
        let created = self.repository.create_post(kind, &post).await?;

        info!(post_id = created.id, "Post published");
        Ok(created)
    }

    pub async fn list_assignments(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<AssignmentModel>, AppError> {
        self.repository
            .list_assignments(limit.unwrap_or(DEFAULT_ASSIGNMENT_LIMIT))
            .await
    }

    #[instrument(skip(self, author, request), fields(author_id = author.0.id))]
    pub async fn publish_assignment(
        &self,
        author: &CurrentUser,
        request: CreateAssignmentRequest,
    ) -> Result<AssignmentModel, AppError> {
        author.ensure_admin()?;

        let album = required("album", request.album)?;
        if !request.arista.has_album(&album) {
            return Err(AppError::Validation(format!(
                "Album '{}' does not belong to {}",
                album,
                request.arista.as_ref()
            )));
        }

        let assignment = NewAssignment {
            title: required("title", request.title)?,
            description: required("description", request.description)?,
            arista: request.arista,
            album,
            due_date: request.due_date,
            author_id: author.0.id,
        };
        let created = self.repository.create_assignment(&assignment).await?;

        info!(assignment_id = created.id, "Assignment published");
        Ok(created)
    }
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}
