//! Station entity models.

use serde::Serialize;
use sqlx::FromRow;
use velofleet_core::geo::{Position, StationPoint};
use velofleet_core::types::DbId;

/// A row from the `stations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: DbId,
    pub name: String,
    pub city_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
}

impl Station {
    /// Location-only view used by the simulation code.
    pub fn point(&self) -> StationPoint {
        StationPoint {
            id: self.id,
            position: Position {
                latitude: self.latitude,
                longitude: self.longitude,
            },
        }
    }
}

/// Input for creating a station.
#[derive(Debug, Clone)]
pub struct CreateStation {
    pub name: String,
    pub city_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
}

/// A station joined with its city name, as the history generator consumes it.
#[derive(Debug, Clone, FromRow)]
pub struct StationWithCity {
    pub id: DbId,
    pub name: String,
    pub city_id: DbId,
    pub city_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl StationWithCity {
    pub fn point(&self) -> StationPoint {
        StationPoint {
            id: self.id,
            position: Position {
                latitude: self.latitude,
                longitude: self.longitude,
            },
        }
    }
}
