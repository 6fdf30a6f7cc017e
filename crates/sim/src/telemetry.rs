//! Telemetry feed export job.
//!
//! Replays every bike's rental history at the configured cadence, routes
//! the samples to a sink, and turns the collected low-battery drafts into
//! support tickets plus a CSV export.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use sqlx::PgPool;

use velofleet_core::geo::StationPoint;
use velofleet_core::params::TelemetryParams;
use velofleet_core::telemetry::{resolve_reference_station, BikeReplay, RentalLeg};
use velofleet_core::types::{DbId, Timestamp};
use velofleet_db::models::CreateSupportTicket;
use velofleet_db::repositories::{BikeRepo, RentalRepo, StationRepo, SupportTicketRepo};

use crate::error::SimError;
use crate::export::export_tickets_csv;
use crate::sink::TelemetrySink;

/// Outcome of a telemetry export run.
#[derive(Debug)]
pub struct TelemetrySummary {
    pub bikes: usize,
    pub skipped: usize,
    pub samples: usize,
    pub tickets: usize,
}

/// Replay `[window_start, window_end]` for the whole fleet.
///
/// Existing tickets are cleared first (the feed and the tickets describe
/// the same replay), new ones are bulk-inserted at the end, and the CSV
/// lands at `csv_path`. Bikes without any resolvable reference station are
/// skipped with a warning.
pub async fn run_telemetry_export<R: Rng, S: TelemetrySink>(
    pool: &PgPool,
    window_start: Timestamp,
    window_end: Timestamp,
    params: &TelemetryParams,
    sink: &mut S,
    csv_path: &Path,
    rng: &mut R,
) -> Result<TelemetrySummary, SimError> {
    let bikes = BikeRepo::list(pool).await?;
    if bikes.is_empty() {
        return Err(SimError::NoBikes);
    }

    SupportTicketRepo::delete_all(pool).await?;

    let stations: HashMap<DbId, StationPoint> = StationRepo::list(pool)
        .await?
        .iter()
        .map(|s| (s.id, s.point()))
        .collect();

    tracing::info!(
        bikes = bikes.len(),
        from = %window_start,
        to = %window_end,
        "starting telemetry export"
    );

    let mut drafts = Vec::new();
    let mut skipped = 0usize;
    let mut samples = 0usize;

    for (processed, bike) in bikes.iter().enumerate() {
        tracing::debug!(bike = bike.id, processed, total = bikes.len(), "replaying bike");

        let rentals = RentalRepo::list_by_bike_ordered(pool, bike.id).await?;
        let legs: Vec<RentalLeg> = rentals
            .iter()
            .filter_map(|rental| {
                let departure = stations.get(&rental.departure_station_id)?;
                let arrival = stations.get(&rental.arrival_station_id)?;
                Some(RentalLeg {
                    rider_id: rental.user_id,
                    departure: *departure,
                    arrival: *arrival,
                    starts_at: rental.starts_at,
                    ends_at: rental.ends_at,
                })
            })
            .collect();

        let origin = bike.origin_station_id.and_then(|id| stations.get(&id)).copied();
        let current = bike.current_station_id.and_then(|id| stations.get(&id)).copied();
        let Some(reference) = resolve_reference_station(origin, current, &legs) else {
            tracing::warn!(bike = bike.id, "no reference station, skipping bike");
            skipped += 1;
            continue;
        };

        sink.begin_bike(bike.id)?;
        let mut replay = BikeReplay::new(bike.id, reference, &legs, window_start, params);
        while replay.cursor() <= window_end {
            let outcome = replay.step(rng);
            sink.write_sample(&outcome.sample)?;
            samples += 1;
            if let Some(draft) = outcome.ticket {
                drafts.push(draft);
            }
        }
        sink.finish_bike(bike.id)?;
    }

    let tickets: Vec<CreateSupportTicket> = drafts
        .into_iter()
        .map(|draft| CreateSupportTicket {
            bike_id: Some(draft.bike_id),
            user_id: Some(draft.rider_id),
            problem: draft.problem,
            description: draft.description,
        })
        .collect();
    let ticket_count = SupportTicketRepo::insert_many(pool, &tickets).await?;

    let exported = export_tickets_csv(pool, csv_path).await?;
    tracing::info!(
        bikes = bikes.len() - skipped,
        skipped,
        samples,
        tickets = ticket_count,
        exported,
        "telemetry export complete"
    );

    Ok(TelemetrySummary {
        bikes: bikes.len() - skipped,
        skipped,
        samples,
        tickets: ticket_count,
    })
}
