use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

use crate::stats::UserStats;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Community rank. Set by admins only; never derived from trazos.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Rank {
    #[default]
    AlmaEnTransito,
    VozEnBoceto,
    NarradorDeAtmosferas,
    EscritorDeIntrospecciones,
    ArquitectoDelAlma,
}

impl Rank {
    /// Medal shown next to the rank; the entry rank has none
    pub fn medal(&self) -> Option<&'static str> {
        match self {
            Rank::AlmaEnTransito => None,
            Rank::VozEnBoceto => Some("Susurros que germinan"),
            Rank::NarradorDeAtmosferas => Some("Excelente narrador"),
            Rank::EscritorDeIntrospecciones => Some("Lector de huellas"),
            Rank::ArquitectoDelAlma => Some("Arquitecto de personajes"),
        }
    }
}

/// Database model for users table
#[derive(Debug, Clone, PartialEq)]
pub struct UserModel {
    pub id: i32,
    pub full_name: String,
    pub age: i32,
    pub birthday: String, // dd/mm
    pub face_claim: String,
    pub signature: String, // unique, '#'-prefixed
    pub facebook_link: String,
    pub motivation: String,
    pub role: Role,
    pub rank: Rank,
    // Materialized from the member's activities, written only by the stats aggregator
    pub total_trazos: i64,
    pub total_words: i64,
    pub total_activities: i64,
    pub registration_date: DateTime<Utc>,
}

impl UserModel {
    pub fn from_new(id: i32, new_user: NewUser, registration_date: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: new_user.full_name,
            age: new_user.age,
            birthday: new_user.birthday,
            face_claim: new_user.face_claim,
            signature: new_user.signature,
            facebook_link: new_user.facebook_link,
            motivation: new_user.motivation,
            role: new_user.role,
            rank: Rank::default(),
            total_trazos: 0,
            total_words: 0,
            total_activities: 0,
            registration_date,
        }
    }

    pub fn stats(&self) -> UserStats {
        UserStats {
            total_trazos: self.total_trazos,
            total_words: self.total_words,
            total_activities: self.total_activities,
        }
    }

    pub fn apply_stats(&mut self, stats: &UserStats) {
        self.total_trazos = stats.total_trazos;
        self.total_words = stats.total_words;
        self.total_activities = stats.total_activities;
    }

    pub fn apply_profile(&mut self, update: &ProfileUpdate) {
        if let Some(full_name) = &update.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(birthday) = &update.birthday {
            self.birthday = birthday.clone();
        }
        if let Some(facebook_link) = &update.facebook_link {
            self.facebook_link = facebook_link.clone();
        }
        if let Some(face_claim) = &update.face_claim {
            self.face_claim = face_claim.clone();
        }
        if let Some(motivation) = &update.motivation {
            self.motivation = motivation.clone();
        }
    }
}

#[cfg(test)]
impl UserModel {
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Validated registration data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub age: i32,
    pub birthday: String,
    pub face_claim: String,
    pub signature: String,
    pub facebook_link: String,
    pub motivation: String,
    pub role: Role,
}

/// Validated profile changes. Stats, rank, role and signature are not part of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub birthday: Option<String>,
    pub facebook_link: Option<String>,
    pub face_claim: Option<String>,
    pub motivation: Option<String>,
}
