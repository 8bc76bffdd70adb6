use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, PgConnection, PgPool, Row};
use std::collections::BTreeMap;
use std::str::FromStr;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{
    albums::Arista,
    models::{ActivityModel, NewActivity},
};
use crate::shared::AppError;
use crate::stats::UserStats;
use crate::trazos::ActivityType;

/// Trait for activity repository operations
#[async_trait]
pub trait ActivityRepository {
    async fn create_activity(&self, activity: &NewActivity) -> Result<ActivityModel, AppError>;
    /// Newest first; `None` returns the complete set
    async fn get_user_activities(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityModel>, AppError>;
    /// Returns whether a row was removed
    async fn delete_activity(&self, activity_id: i32) -> Result<bool, AppError>;

    /// Stores the activity and rewrites the owner's totals from their full activity set
    /// in one transaction. `Ok(None)` means this store has no transactions; the caller
    /// stores and recomputes separately.
    async fn create_activity_with_stats(
        &self,
        _activity: &NewActivity,
    ) -> Result<Option<(ActivityModel, UserStats)>, AppError> {
        Ok(None)
    }
}

#[derive(Debug, Default)]
struct ActivityTable {
    activities: BTreeMap<i32, ActivityModel>,
    last_id: i32,
}

/// In-memory implementation of ActivityRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryActivityRepository {
    table: RwLock<ActivityTable>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    #[instrument(skip(self, activity), fields(user_id = activity.user_id))]
    async fn create_activity(&self, activity: &NewActivity) -> Result<ActivityModel, AppError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let created = ActivityModel::from_new(table.last_id, activity.clone(), Utc::now());
        table.activities.insert(created.id, created.clone());

        debug!(activity_id = created.id, "Activity created in memory");
        Ok(created)
    }

    async fn get_user_activities(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityModel>, AppError> {
        let table = self.table.read().await;
        let mut activities: Vec<ActivityModel> = table
            .activities
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();

        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = limit {
            activities.truncate(limit);
        }
        Ok(activities)
    }

    #[instrument(skip(self))]
    async fn delete_activity(&self, activity_id: i32) -> Result<bool, AppError> {
        let mut table = self.table.write().await;
        let removed = table.activities.remove(&activity_id).is_some();
        debug!(removed, "Activity delete in memory");
        Ok(removed)
    }
}

const ACTIVITY_COLUMNS: &str = "id, user_id, name, date, words, type, responses, link, \
     description, arista, album, trazos, created_at";

/// PostgreSQL implementation of activity repository
pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Activity query failed");
    AppError::DatabaseError(e.to_string())
}

fn to_column(value: u32, name: &str) -> Result<i32, AppError> {
    i32::try_from(value).map_err(|_| AppError::Validation(format!("{} is too large", name)))
}

fn from_column(value: i32, name: &str) -> Result<u32, AppError> {
    u32::try_from(value)
        .map_err(|_| AppError::DatabaseError(format!("Negative {} stored: {}", name, value)))
}

fn activity_from_row(row: &PgRow) -> Result<ActivityModel, AppError> {
    let activity_type: String = row.get("type");
    let arista: String = row.get("arista");
    let responses: Option<i32> = row.get("responses");

    Ok(ActivityModel {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        date: row.get("date"),
        words: from_column(row.get("words"), "words")?,
        activity_type: ActivityType::from_str(&activity_type).map_err(|_| {
            AppError::DatabaseError(format!("Unknown activity type '{}'", activity_type))
        })?,
        responses: from_column(responses.unwrap_or_default(), "responses")?,
        link: row.get("link"),
        description: row.get("description"),
        arista: Arista::from_str(&arista)
            .map_err(|_| AppError::DatabaseError(format!("Unknown arista '{}'", arista)))?,
        album: row.get("album"),
        trazos: from_column(row.get("trazos"), "trazos")?,
        created_at: row.get("created_at"),
    })
}

async fn insert_activity(
    conn: &mut PgConnection,
    activity: &NewActivity,
) -> Result<ActivityModel, AppError> {
    let row = sqlx::query(&format!(
        "INSERT INTO activities (user_id, name, date, words, type, responses, link, description, arista, album, trazos) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {ACTIVITY_COLUMNS}"
    ))
    .bind(activity.user_id)
    .bind(&activity.name)
    .bind(activity.date)
    .bind(to_column(activity.words, "words")?)
    .bind(activity.activity_type.as_ref())
    .bind(to_column(activity.responses, "responses")?)
    .bind(&activity.link)
    .bind(&activity.description)
    .bind(activity.arista.as_ref())
    .bind(&activity.album)
    .bind(to_column(activity.trazos, "trazos")?)
    .fetch_one(conn)
    .await
    .map_err(database_error)?;

    activity_from_row(&row)
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    #[instrument(skip(self, activity), fields(user_id = activity.user_id))]
    async fn create_activity(&self, activity: &NewActivity) -> Result<ActivityModel, AppError> {
        let mut conn = self.pool.acquire().await.map_err(database_error)?;
        let created = insert_activity(&mut conn, activity).await?;
        debug!(activity_id = created.id, "Activity stored in database");
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn get_user_activities(
        &self,
        user_id: i32,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityModel>, AppError> {
        // A NULL limit means no limit in PostgreSQL
        let rows = sqlx::query(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(limit.map(|l| l as i64))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(activity_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn delete_activity(&self, activity_id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(activity_id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, activity), fields(user_id = activity.user_id))]
    async fn create_activity_with_stats(
        &self,
        activity: &NewActivity,
    ) -> Result<Option<(ActivityModel, UserStats)>, AppError> {
        // Dropping `tx` on any early return rolls everything back
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Row lock: concurrent submissions for the same user queue here, so each
        // recompute below sees every committed activity
        let owner = sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(activity.user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(database_error)?;
        if owner.is_none() {
            warn!("Activity owner not found");
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let created = insert_activity(&mut tx, activity).await?;

        let row = sqlx::query(
            "UPDATE users SET \
                total_trazos = totals.trazos, \
                total_words = totals.words, \
                total_activities = totals.activities \
             FROM (SELECT COALESCE(SUM(trazos), 0)::BIGINT AS trazos, \
                          COALESCE(SUM(words), 0)::BIGINT AS words, \
                          COUNT(*) AS activities \
                   FROM activities WHERE user_id = $1) AS totals \
             WHERE users.id = $1 \
             RETURNING total_trazos, total_words, total_activities",
        )
        .bind(activity.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error)?;

        let stats = UserStats {
            total_trazos: row.get("total_trazos"),
            total_words: row.get("total_words"),
            total_activities: row.get("total_activities"),
        };

        tx.commit().await.map_err(database_error)?;

        debug!(
            activity_id = created.id,
            total_trazos = stats.total_trazos,
            "Activity and user totals committed"
        );
        Ok(Some((created, stats)))
    }
}
