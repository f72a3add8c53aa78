//! Session-scoped meal ledger.
//!
//! Every statement that reads or changes a single meal carries both the meal
//! id and the owning session in its `WHERE` clause, so ownership is checked by
//! SQLite in the same statement that does the work.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::{decode_timestamp, decode_uuid, encode_timestamp};
use crate::models::{Meal, MealChanges, Metrics};

#[derive(Clone)]
pub struct MealRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MealRow {
    id: String,
    name: String,
    description: String,
    is_on_diet: bool,
    session_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<MealRow> for Meal {
    type Error = sqlx::Error;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        Ok(Meal {
            id: decode_uuid(&row.id)?,
            name: row.name,
            description: row.description,
            is_on_diet: row.is_on_diet,
            session_id: row.session_id,
            created_at: decode_timestamp(&row.created_at)?,
            updated_at: decode_timestamp(&row.updated_at)?,
        })
    }
}

impl MealRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a meal owned by `meal.session_id`.
    pub async fn create(&self, meal: &Meal) -> Result<Meal, sqlx::Error> {
        let row: MealRow = sqlx::query_as(
            r#"
            INSERT INTO meals (id, name, description, is_on_diet, session_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, name, description, is_on_diet, session_id, created_at, updated_at
            "#,
        )
        .bind(meal.id.to_string())
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.is_on_diet)
        .bind(&meal.session_id)
        .bind(encode_timestamp(&meal.created_at))
        .bind(encode_timestamp(&meal.updated_at))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn get(&self, session_id: &str, id: Uuid) -> Result<Option<Meal>, sqlx::Error> {
        let row: Option<MealRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, is_on_diet, session_id, created_at, updated_at
            FROM meals
            WHERE id = ? AND session_id = ?
            "#,
        )
        .bind(id.to_string())
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Meal::try_from).transpose()
    }

    /// All meals of a session, oldest first. Equal `created_at` values keep
    /// insertion order.
    pub async fn list(&self, session_id: &str) -> Result<Vec<Meal>, sqlx::Error> {
        let rows: Vec<MealRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, is_on_diet, session_id, created_at, updated_at
            FROM meals
            WHERE session_id = ?
            ORDER BY created_at, rowid
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Meal::try_from).collect()
    }

    /// Applies `changes` and refreshes `updated_at`.
    ///
    /// Returns `None` when no meal with this id belongs to the session,
    /// whether the id is unknown or owned by another session.
    pub async fn update(
        &self,
        session_id: &str,
        id: Uuid,
        changes: &MealChanges,
    ) -> Result<Option<Meal>, sqlx::Error> {
        let updated_at = encode_timestamp(&crate::models::now());

        let row: Option<MealRow> = sqlx::query_as(
            r#"
            UPDATE meals
            SET name = COALESCE(?, name),
                description = COALESCE(?, description),
                is_on_diet = COALESCE(?, is_on_diet),
                updated_at = ?
            WHERE id = ? AND session_id = ?
            RETURNING id, name, description, is_on_diet, session_id, created_at, updated_at
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.is_on_diet)
        .bind(&updated_at)
        .bind(id.to_string())
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Meal::try_from).transpose()
    }

    /// Returns whether a meal was removed.
    pub async fn delete(&self, session_id: &str, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM meals WHERE id = ? AND session_id = ?")
            .bind(id.to_string())
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Computes metrics from one ordered read, so the counts and the streak
    /// always describe the same snapshot.
    pub async fn metrics(&self, session_id: &str) -> Result<Metrics, sqlx::Error> {
        let history: Vec<bool> = sqlx::query_scalar(
            "SELECT is_on_diet FROM meals WHERE session_id = ? ORDER BY created_at, rowid",
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Metrics::from_history(history))
    }
}
