//! Origin station backfill.
//!
//! Legacy fleets predate the origin column; this assigns each orphaned
//! bike its current station, falling back to the first station on record.

use sqlx::PgPool;

use velofleet_db::repositories::{BikeRepo, StationRepo};

use crate::error::SimError;

/// Outcome of an origin backfill run.
#[derive(Debug)]
pub struct OriginFixSummary {
    pub fixed: usize,
}

/// Backfill `origin_station_id` for every bike missing one.
pub async fn run_fix_origins(pool: &PgPool) -> Result<OriginFixSummary, SimError> {
    let fallback = StationRepo::first(pool).await?.ok_or(SimError::NoStations)?;

    let orphans = BikeRepo::list_missing_origin(pool).await?;
    tracing::info!(count = orphans.len(), "backfilling bike origin stations");

    for bike in &orphans {
        let origin = bike.current_station_id.unwrap_or(fallback.id);
        BikeRepo::update_origin_station(pool, bike.id, origin).await?;
    }

    Ok(OriginFixSummary {
        fixed: orphans.len(),
    })
}
