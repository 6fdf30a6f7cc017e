//! Rental entity models.

use serde::Serialize;
use sqlx::FromRow;
use velofleet_core::types::{DbId, Timestamp};

/// A row from the `rentals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rental {
    pub id: DbId,
    pub bike_id: DbId,
    pub user_id: DbId,
    pub departure_station_id: DbId,
    pub arrival_station_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// Input for creating a rental.
#[derive(Debug, Clone)]
pub struct CreateRental {
    pub bike_id: DbId,
    pub user_id: DbId,
    pub departure_station_id: DbId,
    pub arrival_station_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}
