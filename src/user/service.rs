use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{NewUser, ProfileUpdate, Rank, Role, UserModel},
    repository::UserRepository,
    types::{ProfileUpdateRequest, RegisterRequest},
};
use crate::session::CurrentUser;
use crate::shared::{AppError, AppState};

const SIGNATURE_PREFIX: char = '#';

/// Service for member registration, login lookup and profile management
pub struct UserService {
    repository: Arc<dyn UserRepository + Send + Sync>,
    admin_signature: String,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository + Send + Sync>, admin_signature: String) -> Self {
        Self {
            repository,
            admin_signature,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.user_repository),
            state.config.admin_signature.clone(),
        )
    }

    /// Validates and stores a new member. The configured admin signature registers as admin.
    #[instrument(skip(self, request), fields(signature = %request.signature))]
    pub async fn register(&self, request: RegisterRequest) -> Result<UserModel, AppError> {
        let signature = request.signature.trim().to_string();
        ensure_signature_format(&signature)?;

        let new_user = NewUser {
            full_name: required("fullName", request.full_name)?,
            age: parse_age(request.age)?,
            birthday: parse_birthday(request.birthday)?,
            face_claim: required("faceClaim", request.face_claim)?,
            facebook_link: required("facebookLink", request.facebook_link)?,
            motivation: required("motivation", request.motivation)?,
            role: if signature == self.admin_signature {
                Role::Admin
            } else {
                Role::User
            },
            signature,
        };

        if self
            .repository
            .get_user_by_signature(&new_user.signature)
            .await?
            .is_some()
        {
            warn!("Signature already registered");
            return Err(AppError::Conflict(
                "Signature is already registered".to_string(),
            ));
        }

        let user = self.repository.create_user(&new_user).await?;
        info!(user_id = user.id, role = user.role.as_ref(), "Member registered");
        Ok(user)
    }

    /// Looks a member up by signature for login
    #[instrument(skip(self))]
    pub async fn authenticate(&self, signature: &str) -> Result<UserModel, AppError> {
        let signature = signature.trim();
        ensure_signature_format(signature)?;

        self.repository
            .get_user_by_signature(signature)
            .await?
            .ok_or_else(|| {
                warn!("Login attempt with unknown signature");
                AppError::Unauthorized("Firma no encontrada".to_string())
            })
    }

    pub async fn get_profile(&self, user_id: i32) -> Result<UserModel, AppError> {
        self.repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Members may edit their personal fields; face claim and motivation are admin-only
    #[instrument(skip(self, current, request), fields(user_id = current.0.id))]
    pub async fn update_profile(
        &self,
        current: &CurrentUser,
        request: ProfileUpdateRequest,
    ) -> Result<UserModel, AppError> {
        if !current.is_admin() && (request.face_claim.is_some() || request.motivation.is_some()) {
            warn!("Non-admin tried to edit admin-only profile fields");
            return Err(AppError::Forbidden(
                "Only admins can change face claim or motivation".to_string(),
            ));
        }

        let update = ProfileUpdate {
            full_name: request
                .full_name
                .map(|v| required("fullName", v))
                .transpose()?,
            age: request.age.map(parse_age).transpose()?,
            birthday: request.birthday.map(parse_birthday).transpose()?,
            facebook_link: request
                .facebook_link
                .map(|v| required("facebookLink", v))
                .transpose()?,
            face_claim: request
                .face_claim
                .map(|v| required("faceClaim", v))
                .transpose()?,
            motivation: request
                .motivation
                .map(|v| required("motivation", v))
                .transpose()?,
        };

        let user = self.repository.update_profile(current.0.id, &update).await?;
        info!("Profile updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn set_role_by_signature(
        &self,
        signature: &str,
        role: Role,
    ) -> Result<UserModel, AppError> {
        let target = self.find_by_signature(signature).await?;
        let user = self.repository.set_role(target.id, role).await?;
        info!(user_id = user.id, role = role.as_ref(), "Role updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn set_rank_by_signature(
        &self,
        signature: &str,
        rank: Rank,
    ) -> Result<UserModel, AppError> {
        let target = self.find_by_signature(signature).await?;
        let user = self.repository.set_rank(target.id, rank).await?;
        info!(user_id = user.id, rank = rank.as_ref(), "Rank updated");
        Ok(user)
    }

    async fn find_by_signature(&self, signature: &str) -> Result<UserModel, AppError> {
        let signature = normalize_signature(signature);
        self.repository
            .get_user_by_signature(&signature)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No member with signature {}", signature)))
    }
}

/// Admin tools accept signatures with or without the leading '#'
pub fn normalize_signature(signature: &str) -> String {
    let trimmed = signature.trim();
    if trimmed.starts_with(SIGNATURE_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", SIGNATURE_PREFIX, trimmed)
    }
}

fn ensure_signature_format(signature: &str) -> Result<(), AppError> {
    match signature.strip_prefix(SIGNATURE_PREFIX) {
        Some(handle) if !handle.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation(
            "La firma debe comenzar con #".to_string(),
        )),
    }
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

fn parse_age(age: i64) -> Result<i32, AppError> {
    if !(0..=150).contains(&age) {
        return Err(AppError::Validation(format!("Invalid age {}", age)));
    }
    Ok(age as i32)
}

/// Accepts "dd/mm"
fn parse_birthday(birthday: String) -> Result<String, AppError> {
    let birthday = birthday.trim().to_string();
    let invalid = || AppError::Validation(format!("Birthday '{}' must be dd/mm", birthday));

    let (day, month) = birthday.split_once('/').ok_or_else(invalid)?;
    if day.len() != 2 || month.len() != 2 {
        return Err(invalid());
    }
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return Err(invalid());
    }

    Ok(birthday)
}
