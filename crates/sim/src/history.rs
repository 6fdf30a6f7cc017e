//! Rental history generation job.
//!
//! Destructively resets the simulated part of the store (rentals, bikes,
//! tickets, non-admin users) and regenerates a fresh fleet with a full
//! rental timeline, all inside one transaction: a failure mid-run rolls
//! back to the previous dataset instead of leaving a half-populated store.

use rand::Rng;
use sqlx::PgPool;

use velofleet_core::history::plan_bike_history;
use velofleet_core::params::HistoryParams;
use velofleet_core::status::BikeStatus;
use velofleet_core::types::{DbId, Timestamp};
use velofleet_db::models::{CreateBike, CreateRental, StationWithCity};
use velofleet_db::repositories::{BikeRepo, RentalRepo, StationRepo, SupportTicketRepo, UserRepo};

use crate::error::SimError;
use crate::seed::{demo_bike, demo_password_hash, demo_users};

/// Riders recreated on every history run.
pub const RIDER_POOL_SIZE: usize = 500;
/// Bikes docked at each station at the start of the window.
pub const BIKES_PER_STATION: usize = 20;
/// Progress is logged every this many bikes.
const PROGRESS_EVERY: usize = 50;

/// Outcome of a history generation run.
#[derive(Debug)]
pub struct HistorySummary {
    pub riders: usize,
    pub bikes: usize,
    pub rentals: usize,
}

/// Reset and regenerate the rental history over `[window_start, window_end)`.
///
/// Requires stations to exist; aborts with [`SimError::NoStations`]
/// otherwise. Admin accounts and the city/station layout survive the reset.
pub async fn run_history_generation<R: Rng>(
    pool: &PgPool,
    window_start: Timestamp,
    window_end: Timestamp,
    params: &HistoryParams,
    rng: &mut R,
) -> Result<HistorySummary, SimError> {
    let stations = StationRepo::list_with_city(pool).await?;
    if stations.is_empty() {
        return Err(SimError::NoStations);
    }

    tracing::info!(
        stations = stations.len(),
        from = %window_start,
        to = %window_end,
        "starting history generation"
    );

    let mut tx = pool.begin().await?;

    // Destructive reset of everything the simulation owns.
    RentalRepo::delete_all(&mut tx).await?;
    SupportTicketRepo::delete_all_tx(&mut tx).await?;
    BikeRepo::delete_all(&mut tx).await?;
    UserRepo::delete_non_admin(&mut tx).await?;

    // Fresh rider pool.
    let password_hash = demo_password_hash()?;
    let riders = demo_users(RIDER_POOL_SIZE, &password_hash, rng);
    let rider_ids = UserRepo::insert_many(&mut tx, &riders).await?;

    // 20 bikes docked at every station.
    let mut fleet: Vec<(DbId, &StationWithCity)> = Vec::new();
    for station in &stations {
        for _ in 0..BIKES_PER_STATION {
            let bike = CreateBike {
                origin_station_id: Some(station.id),
                current_station_id: Some(station.id),
                status: BikeStatus::Available,
                ..demo_bike(rng)
            };
            let created = BikeRepo::create(&mut tx, &bike).await?;
            fleet.push((created.id, station));
        }
    }

    tracing::info!(bikes = fleet.len(), "fleet created, generating rentals");

    let mut total_rentals = 0usize;
    for (processed, (bike_id, station)) in fleet.iter().enumerate() {
        if processed % PROGRESS_EVERY == 0 {
            tracing::info!(processed, total = fleet.len(), "generating rental history");
        }

        let city_stations: Vec<_> = stations
            .iter()
            .filter(|s| s.city_id == station.city_id)
            .map(StationWithCity::point)
            .collect();

        let plan = plan_bike_history(
            &station.city_name,
            &city_stations,
            station.id,
            &rider_ids,
            window_start,
            window_end,
            params,
            rng,
        );

        for rental in &plan.rentals {
            RentalRepo::create(
                &mut tx,
                &CreateRental {
                    bike_id: *bike_id,
                    user_id: rental.rider_id,
                    departure_station_id: rental.departure_station_id,
                    arrival_station_id: rental.arrival_station_id,
                    starts_at: rental.starts_at,
                    ends_at: rental.ends_at,
                },
            )
            .await?;
        }
        total_rentals += plan.rentals.len();

        BikeRepo::update_current_station(&mut tx, *bike_id, Some(plan.final_station_id)).await?;
    }

    tx.commit().await?;

    tracing::info!(
        riders = rider_ids.len(),
        bikes = fleet.len(),
        rentals = total_rentals,
        "history generation complete"
    );

    Ok(HistorySummary {
        riders: rider_ids.len(),
        bikes: fleet.len(),
        rentals: total_rentals,
    })
}
