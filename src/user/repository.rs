use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::BTreeMap;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::models::{NewUser, ProfileUpdate, Rank, Role, UserModel};
use crate::ranking::{order_users, RankingMetric};
use crate::shared::AppError;
use crate::stats::UserStats;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository {
    /// Fails with `Conflict` when the signature is already registered
    async fn create_user(&self, user: &NewUser) -> Result<UserModel, AppError>;
    async fn get_user(&self, user_id: i32) -> Result<Option<UserModel>, AppError>;
    async fn get_user_by_signature(&self, signature: &str)
        -> Result<Option<UserModel>, AppError>;
    async fn update_profile(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> Result<UserModel, AppError>;
    /// Overwrites the three materialized totals in one write
    async fn update_user_stats(&self, user_id: i32, stats: &UserStats) -> Result<(), AppError>;
    async fn set_role(&self, user_id: i32, role: Role) -> Result<UserModel, AppError>;
    async fn set_rank(&self, user_id: i32, rank: Rank) -> Result<UserModel, AppError>;
    /// Users by `metric` descending, ties broken by ascending id
    async fn get_users_ordered_by(
        &self,
        metric: RankingMetric,
        limit: usize,
    ) -> Result<Vec<UserModel>, AppError>;
}

#[derive(Debug, Default)]
struct UserTable {
    users: BTreeMap<i32, UserModel>,
    last_id: i32,
}

/// In-memory implementation of UserRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn modify<F>(&self, user_id: i32, change: F) -> Result<UserModel, AppError>
    where
        F: FnOnce(&mut UserModel) + Send,
    {
        let mut table = self.table.write().await;
        let user = table.users.get_mut(&user_id).ok_or_else(|| {
            warn!(user_id, "User not found for update in memory");
            AppError::NotFound("User not found".to_string())
        })?;
        change(user);
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(signature = %user.signature))]
    async fn create_user(&self, user: &NewUser) -> Result<UserModel, AppError> {
        let mut table = self.table.write().await;

        if table.users.values().any(|u| u.signature == user.signature) {
            warn!("Signature already registered in memory");
            return Err(AppError::Conflict(
                "Signature is already registered".to_string(),
            ));
        }

        table.last_id += 1;
        let created = UserModel::from_new(table.last_id, user.clone(), Utc::now());
        table.users.insert(created.id, created.clone());

        debug!(user_id = created.id, "User created in memory");
        Ok(created)
    }

    async fn get_user(&self, user_id: i32) -> Result<Option<UserModel>, AppError> {
        let table = self.table.read().await;
        Ok(table.users.get(&user_id).cloned())
    }

    async fn get_user_by_signature(
        &self,
        signature: &str,
    ) -> Result<Option<UserModel>, AppError> {
        let table = self.table.read().await;
        Ok(table
            .users
            .values()
            .find(|u| u.signature == signature)
            .cloned())
    }

    #[instrument(skip(self, update))]
    async fn update_profile(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> Result<UserModel, AppError> {
        self.modify(user_id, |user| user.apply_profile(update)).await
    }

    #[instrument(skip(self))]
    async fn update_user_stats(&self, user_id: i32, stats: &UserStats) -> Result<(), AppError> {
        self.modify(user_id, |user| user.apply_stats(stats))
            .await
            .map(|_| ())
    }

    #[instrument(skip(self))]
    async fn set_role(&self, user_id: i32, role: Role) -> Result<UserModel, AppError> {
        self.modify(user_id, |user| user.role = role).await
    }

    #[instrument(skip(self))]
    async fn set_rank(&self, user_id: i32, rank: Rank) -> Result<UserModel, AppError> {
        self.modify(user_id, |user| user.rank = rank).await
    }

    async fn get_users_ordered_by(
        &self,
        metric: RankingMetric,
        limit: usize,
    ) -> Result<Vec<UserModel>, AppError> {
        let table = self.table.read().await;
        Ok(order_users(table.users.values().cloned(), metric, limit))
    }
}

const USER_COLUMNS: &str = "id, full_name, age, birthday, face_claim, signature, facebook_link, \
     motivation, role, rank, total_trazos, total_words, total_activities, registration_date";

/// PostgreSQL implementation of user repository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "User query failed");
    AppError::DatabaseError(e.to_string())
}

fn user_from_row(row: &PgRow) -> Result<UserModel, AppError> {
    let role: String = row.get("role");
    let rank: String = row.get("rank");

    Ok(UserModel {
        id: row.get("id"),
        full_name: row.get("full_name"),
        age: row.get("age"),
        birthday: row.get("birthday"),
        face_claim: row.get("face_claim"),
        signature: row.get("signature"),
        facebook_link: row.get("facebook_link"),
        motivation: row.get("motivation"),
        role: Role::from_str(&role)
            .map_err(|_| AppError::DatabaseError(format!("Unknown role '{}'", role)))?,
        rank: Rank::from_str(&rank)
            .map_err(|_| AppError::DatabaseError(format!("Unknown rank '{}'", rank)))?,
        total_trazos: row.get("total_trazos"),
        total_words: row.get("total_words"),
        total_activities: row.get("total_activities"),
        registration_date: row.get("registration_date"),
    })
}

fn found_or_not_found(row: Option<PgRow>) -> Result<UserModel, AppError> {
    match row {
        Some(row) => user_from_row(&row),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user), fields(signature = %user.signature))]
    async fn create_user(&self, user: &NewUser) -> Result<UserModel, AppError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (full_name, age, birthday, face_claim, signature, facebook_link, motivation, role) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.full_name)
        .bind(user.age)
        .bind(&user.birthday)
        .bind(&user.face_claim)
        .bind(&user.signature)
        .bind(&user.facebook_link)
        .bind(&user.motivation)
        .bind(user.role.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == "23505");
            if unique_violation {
                warn!("Signature already registered in database");
                AppError::Conflict("Signature is already registered".to_string())
            } else {
                database_error(e)
            }
        })?;

        user_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: i32) -> Result<Option<UserModel>, AppError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn get_user_by_signature(
        &self,
        signature: &str,
    ) -> Result<Option<UserModel>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE signature = $1"
        ))
        .bind(signature)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    #[instrument(skip(self, update))]
    async fn update_profile(
        &self,
        user_id: i32,
        update: &ProfileUpdate,
    ) -> Result<UserModel, AppError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET \
                full_name = COALESCE($2, full_name), \
                age = COALESCE($3, age), \
                birthday = COALESCE($4, birthday), \
                facebook_link = COALESCE($5, facebook_link), \
                face_claim = COALESCE($6, face_claim), \
                motivation = COALESCE($7, motivation) \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&update.full_name)
        .bind(update.age)
        .bind(&update.birthday)
        .bind(&update.facebook_link)
        .bind(&update.face_claim)
        .bind(&update.motivation)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        found_or_not_found(row)
    }

    #[instrument(skip(self))]
    async fn update_user_stats(&self, user_id: i32, stats: &UserStats) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET total_trazos = $2, total_words = $3, total_activities = $4 WHERE id = $1",
        )
        .bind(user_id)
        .bind(stats.total_trazos)
        .bind(stats.total_words)
        .bind(stats.total_activities)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            warn!(user_id, "User not found for stats update");
            return Err(AppError::NotFound("User not found".to_string()));
        }

        debug!(user_id, "User stats written to database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_role(&self, user_id: i32, role: Role) -> Result<UserModel, AppError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(role.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        found_or_not_found(row)
    }

    #[instrument(skip(self))]
    async fn set_rank(&self, user_id: i32, rank: Rank) -> Result<UserModel, AppError> {
        let row = sqlx::query(&format!(
            "UPDATE users SET rank = $2 WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(rank.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        found_or_not_found(row)
    }

    #[instrument(skip(self))]
    async fn get_users_ordered_by(
        &self,
        metric: RankingMetric,
        limit: usize,
    ) -> Result<Vec<UserModel>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY {} DESC, id ASC LIMIT $1",
            metric.column()
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(user_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::sample_new_user;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create_user(&sample_new_user("#pluma")).await.unwrap();
        assert_eq!(created.id, 1);

        let by_id = repo.get_user(created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_signature = repo.get_user_by_signature("#pluma").await.unwrap().unwrap();
        assert_eq!(by_signature.id, created.id);
    }

    #[tokio::test]
    async fn test_ids_follow_registration_order() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create_user(&sample_new_user("#uno")).await.unwrap();
        let second = repo.create_user(&sample_new_user("#dos")).await.unwrap();
        assert!(first.id < second.id);
    }

    #[tokio::test]
    async fn test_duplicate_signature_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&sample_new_user("#pluma")).await.unwrap();

        let result = repo.create_user(&sample_new_user("#pluma")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_nonexistent_user() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.get_user(99).await.unwrap().is_none());
        assert!(repo.get_user_by_signature("#nadie").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_user_stats_overwrites_totals() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(&sample_new_user("#pluma")).await.unwrap();

        let stats = UserStats {
            total_trazos: 700,
            total_words: 1200,
            total_activities: 2,
        };
        repo.update_user_stats(user.id, &stats).await.unwrap();

        let stored = repo.get_user(user.id).await.unwrap().unwrap();
        assert_eq!(stored.stats(), stats);
    }

    #[tokio::test]
    async fn test_update_stats_for_missing_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update_user_stats(5, &UserStats::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_set_role_and_rank() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create_user(&sample_new_user("#pluma")).await.unwrap();

        let promoted = repo.set_role(user.id, Role::Admin).await.unwrap();
        assert_eq!(promoted.role, Role::Admin);

        let ranked = repo.set_rank(user.id, Rank::VozEnBoceto).await.unwrap();
        assert_eq!(ranked.rank, Rank::VozEnBoceto);
        assert_eq!(ranked.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_users_ordered_by_metric() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create_user(&sample_new_user("#a")).await.unwrap();
        let b = repo.create_user(&sample_new_user("#b")).await.unwrap();
        let c = repo.create_user(&sample_new_user("#c")).await.unwrap();

        repo.update_user_stats(a.id, &UserStats { total_trazos: 300, total_words: 900, total_activities: 1 })
            .await
            .unwrap();
        repo.update_user_stats(b.id, &UserStats { total_trazos: 500, total_words: 100, total_activities: 2 })
            .await
            .unwrap();
        repo.update_user_stats(c.id, &UserStats { total_trazos: 300, total_words: 50, total_activities: 1 })
            .await
            .unwrap();

        let by_trazos: Vec<i32> = repo
            .get_users_ordered_by(RankingMetric::Trazos, 10)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(by_trazos, vec![b.id, a.id, c.id]);

        let by_words: Vec<i32> = repo
            .get_users_ordered_by(RankingMetric::Words, 2)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(by_words, vec![a.id, b.id]);
    }
}
