//! User repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mercato_core::{NewUser, PasswordDigest, User, UserId, UserPatch};

use crate::error::StoreResult;

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password: PasswordDigest::from_stored(row.password_hash),
            created_at: row.created_at,
        }
    }
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &NewUser) -> StoreResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&input.username)
        .bind(input.email.as_str())
        .bind(input.password.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn get(&self, id: UserId) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    pub async fn find_many(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Write the present fields of `patch`; absent ones keep their value.
    pub async fn update(&self, id: UserId, patch: &UserPatch) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.username.as_deref())
        .bind(patch.email.as_ref().map(|e| e.as_str()))
        .bind(patch.password.as_ref().map(|p| p.as_str()))
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}
