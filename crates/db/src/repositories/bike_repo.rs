//! Repository for the `bikes` table.

use sqlx::{PgPool, Postgres, Transaction};
use velofleet_core::types::DbId;

use crate::models::bike::{Bike, CreateBike};

const COLUMNS: &str = "id, brand, model, hourly_rate, origin_station_id, \
                       current_station_id, battery, status";

/// Provides CRUD operations for bikes.
pub struct BikeRepo;

impl BikeRepo {
    /// Insert a new bike within the caller's transaction, returning the
    /// created row.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateBike,
    ) -> Result<Bike, sqlx::Error> {
        let query = format!(
            "INSERT INTO bikes (brand, model, hourly_rate, origin_station_id, \
                                current_station_id, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bike>(&query)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.hourly_rate)
            .bind(input.origin_station_id)
            .bind(input.current_station_id)
            .bind(input.status.as_db_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a bike by internal ID.
    ///
    /// `None` is the not-found signal the read-facing collaborator maps to
    /// its 404.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bike>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bikes WHERE id = $1");
        sqlx::query_as::<_, Bike>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all bikes ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Bike>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bikes ORDER BY id");
        sqlx::query_as::<_, Bike>(&query).fetch_all(pool).await
    }

    /// List available bikes ordered by brand, the listing the rental UI
    /// shows.
    pub async fn list_available(pool: &PgPool) -> Result<Vec<Bike>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bikes WHERE status = 'available' ORDER BY brand");
        sqlx::query_as::<_, Bike>(&query).fetch_all(pool).await
    }

    /// List bikes whose origin station was never recorded.
    pub async fn list_missing_origin(pool: &PgPool) -> Result<Vec<Bike>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM bikes WHERE origin_station_id IS NULL ORDER BY id");
        sqlx::query_as::<_, Bike>(&query).fetch_all(pool).await
    }

    /// Re-dock a bike at a station (or mark it in transit with `None`)
    /// within the caller's transaction.
    pub async fn update_current_station(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        station_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE bikes SET current_station_id = $2 WHERE id = $1")
            .bind(id)
            .bind(station_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Backfill a bike's origin station. Returns `true` if the row was
    /// updated.
    pub async fn update_origin_station(
        pool: &PgPool,
        id: DbId,
        station_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE bikes SET origin_station_id = $2 WHERE id = $1")
            .bind(id)
            .bind(station_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every bike within the caller's transaction. Returns the number
    /// of deleted rows.
    pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bikes").execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }

    /// Total number of bikes.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bikes")
            .fetch_one(pool)
            .await
    }
}
