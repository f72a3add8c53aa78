use sqlx::SqlitePool;

use super::{decode_timestamp, decode_uuid, encode_timestamp};
use crate::models::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    session_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: decode_uuid(&row.id)?,
            name: row.name,
            session_id: row.session_id,
            created_at: decode_timestamp(&row.created_at)?,
            updated_at: decode_timestamp(&row.updated_at)?,
        })
    }
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<User, sqlx::Error> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, name, session_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, session_id, created_at, updated_at
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.session_id)
        .bind(encode_timestamp(&user.created_at))
        .bind(encode_timestamp(&user.updated_at))
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    pub async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, name, session_id, created_at, updated_at FROM users ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    pub async fn list_by_session(&self, session_id: &str) -> Result<Vec<User>, sqlx::Error> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, session_id, created_at, updated_at FROM users
            WHERE session_id = ?
            ORDER BY created_at, rowid
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}
