//! Repository for the `users` table.

use sqlx::{PgPool, Postgres, Transaction};
use velofleet_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, email, first_name, last_name, \
                       password_hash, is_admin, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, first_name, last_name, password_hash, is_admin)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Insert a batch of users within the caller's transaction, returning
    /// the created IDs in input order.
    pub async fn insert_many(
        tx: &mut Transaction<'_, Postgres>,
        inputs: &[CreateUser],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut ids = Vec::with_capacity(inputs.len());
        for input in inputs {
            let id = sqlx::query_scalar::<_, DbId>(
                "INSERT INTO users (username, email, first_name, last_name, \
                                    password_hash, is_admin)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING id",
            )
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(&mut **tx)
            .await?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// IDs of all non-admin users, the rider pool the simulation draws
    /// from.
    pub async fn list_rider_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE is_admin = false ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Delete every non-admin user within the caller's transaction. Returns
    /// the number of deleted rows.
    pub async fn delete_non_admin(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE is_admin = false")
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Total number of users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }
}
