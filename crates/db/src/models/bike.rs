//! Bike entity models.

use serde::Serialize;
use sqlx::FromRow;
use velofleet_core::status::BikeStatus;
use velofleet_core::types::DbId;

/// A row from the `bikes` table.
///
/// `status` holds the raw database code; parse it with
/// [`BikeStatus::from_db_str`] when a typed view is needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bike {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub hourly_rate: f64,
    pub origin_station_id: Option<DbId>,
    pub current_station_id: Option<DbId>,
    pub battery: f64,
    pub status: String,
}

/// Input for creating a bike.
#[derive(Debug, Clone)]
pub struct CreateBike {
    pub brand: String,
    pub model: String,
    pub hourly_rate: f64,
    pub origin_station_id: Option<DbId>,
    pub current_station_id: Option<DbId>,
    pub status: BikeStatus,
}
