//! Repository for the `cities` table.

use sqlx::PgPool;
use velofleet_core::types::DbId;

use crate::models::city::City;

const COLUMNS: &str = "id, name";

/// Provides CRUD operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// Insert a new city, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<City, sqlx::Error> {
        let query = format!("INSERT INTO cities (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, City>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a city by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE id = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a city by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE name = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all cities ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities ORDER BY name");
        sqlx::query_as::<_, City>(&query).fetch_all(pool).await
    }
}
