//! Repository for the `stations` table.

use sqlx::PgPool;
use velofleet_core::types::DbId;

use crate::models::station::{CreateStation, Station, StationWithCity};

const COLUMNS: &str = "id, name, city_id, latitude, longitude";

/// Provides CRUD operations for stations.
pub struct StationRepo;

impl StationRepo {
    /// Insert a new station, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStation) -> Result<Station, sqlx::Error> {
        let query = format!(
            "INSERT INTO stations (name, city_id, latitude, longitude)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Station>(&query)
            .bind(&input.name)
            .bind(input.city_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .fetch_one(pool)
            .await
    }

    /// Find a station by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stations WHERE id = $1");
        sqlx::query_as::<_, Station>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stations ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stations ORDER BY id");
        sqlx::query_as::<_, Station>(&query).fetch_all(pool).await
    }

    /// List the stations of one city, ordered by ID.
    pub async fn list_by_city(pool: &PgPool, city_id: DbId) -> Result<Vec<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stations WHERE city_id = $1 ORDER BY id");
        sqlx::query_as::<_, Station>(&query)
            .bind(city_id)
            .fetch_all(pool)
            .await
    }

    /// List all stations joined with their city name, ordered by ID.
    pub async fn list_with_city(pool: &PgPool) -> Result<Vec<StationWithCity>, sqlx::Error> {
        sqlx::query_as::<_, StationWithCity>(
            "SELECT s.id, s.name, s.city_id, c.name AS city_name, s.latitude, s.longitude
             FROM stations s
             JOIN cities c ON c.id = s.city_id
             ORDER BY s.id",
        )
        .fetch_all(pool)
        .await
    }

    /// The station with the lowest ID, used as a backfill fallback.
    pub async fn first(pool: &PgPool) -> Result<Option<Station>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stations ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Station>(&query).fetch_optional(pool).await
    }
}
