//! Repository for the `rentals` table.

use sqlx::{PgPool, Postgres, Transaction};
use velofleet_core::types::DbId;

use crate::models::rental::{CreateRental, Rental};

const COLUMNS: &str = "id, bike_id, user_id, departure_station_id, \
                       arrival_station_id, starts_at, ends_at";

/// Provides CRUD operations for rentals.
pub struct RentalRepo;

impl RentalRepo {
    /// Insert a new rental within the caller's transaction, returning the
    /// created row.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateRental,
    ) -> Result<Rental, sqlx::Error> {
        let query = format!(
            "INSERT INTO rentals (bike_id, user_id, departure_station_id, \
                                  arrival_station_id, starts_at, ends_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rental>(&query)
            .bind(input.bike_id)
            .bind(input.user_id)
            .bind(input.departure_station_id)
            .bind(input.arrival_station_id)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(&mut **tx)
            .await
    }

    /// List one bike's rentals in chronological order, the order the
    /// telemetry replay consumes them in.
    pub async fn list_by_bike_ordered(
        pool: &PgPool,
        bike_id: DbId,
    ) -> Result<Vec<Rental>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rentals WHERE bike_id = $1 ORDER BY starts_at");
        sqlx::query_as::<_, Rental>(&query)
            .bind(bike_id)
            .fetch_all(pool)
            .await
    }

    /// Delete every rental within the caller's transaction. Returns the
    /// number of deleted rows.
    pub async fn delete_all(tx: &mut Transaction<'_, Postgres>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rentals").execute(&mut **tx).await?;
        Ok(result.rows_affected())
    }

    /// Total number of rentals.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rentals")
            .fetch_one(pool)
            .await
    }
}
