use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::{Rank, Role, UserModel};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub age: i64,
    pub birthday: String,
    pub face_claim: String,
    pub signature: String,
    pub facebook_link: String,
    pub motivation: String,
}

/// PATCH /api/profile body. Omitted fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub age: Option<i64>,
    pub birthday: Option<String>,
    pub facebook_link: Option<String>,
    pub face_claim: Option<String>,
    pub motivation: Option<String>,
}

/// Public view of a member
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub full_name: String,
    pub age: i32,
    pub birthday: String,
    pub face_claim: String,
    pub signature: String,
    pub facebook_link: String,
    pub motivation: String,
    pub role: Role,
    pub rank: Rank,
    pub medal: Option<String>,
    pub total_trazos: i64,
    pub total_words: i64,
    pub total_activities: i64,
    pub registration_date: DateTime<Utc>,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            medal: user.rank.medal().map(str::to_string),
            id: user.id,
            full_name: user.full_name,
            age: user.age,
            birthday: user.birthday,
            face_claim: user.face_claim,
            signature: user.signature,
            facebook_link: user.facebook_link,
            motivation: user.motivation,
            role: user.role,
            rank: user.rank,
            total_trazos: user.total_trazos,
            total_words: user.total_words,
            total_activities: user.total_activities,
            registration_date: user.registration_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdminRoleRequest {
    pub signature: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct AdminRankRequest {
    pub signature: String,
    pub rank: Rank,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUpdateResponse {
    pub message: String,
    pub user: UserResponse,
}
