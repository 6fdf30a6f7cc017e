//! Rental history planning.
//!
//! Walks simulated time for one bike across a date window and decides when
//! rentals happen, gated by the weather oracle. Planning is pure: the caller
//! supplies the city's stations, the rider pool, and the RNG, and persists
//! the returned plan itself.

use chrono::Duration;
use rand::Rng;

use crate::geo::StationPoint;
use crate::params::HistoryParams;
use crate::types::{DbId, Timestamp};
use crate::weather::{get_weather, WeatherCondition};

/// One planned rental, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRental {
    pub rider_id: DbId,
    pub departure_station_id: DbId,
    pub arrival_station_id: DbId,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// The full plan for one bike: its rentals plus where it ends up docked.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeHistory {
    pub rentals: Vec<PlannedRental>,
    pub final_station_id: DbId,
}

/// Plan a bike's rental timeline over `[window_start, window_end)`.
///
/// `stations` are the stations of the bike's city and `start_station_id` is
/// where the bike is docked when the window opens. Rentals come out
/// strictly ordered and non-overlapping: each departure is at least the
/// drawn rest period after the previous arrival.
///
/// An empty rider pool produces an empty plan, as does a city where the
/// bike's station is the only one.
pub fn plan_bike_history<R: Rng>(
    city_name: &str,
    stations: &[StationPoint],
    start_station_id: DbId,
    rider_ids: &[DbId],
    window_start: Timestamp,
    window_end: Timestamp,
    params: &HistoryParams,
    rng: &mut R,
) -> BikeHistory {
    let mut rentals = Vec::new();
    let mut station_id = start_station_id;

    if rider_ids.is_empty() {
        return BikeHistory {
            rentals,
            final_station_id: station_id,
        };
    }

    let mut cursor = window_start;
    loop {
        let rest_hours = rng.random_range(params.rest_hours_min..params.rest_hours_max);
        let departs_at = cursor + Duration::seconds((rest_hours * 3600.0) as i64);
        if departs_at >= window_end {
            break;
        }

        if get_weather(city_name, departs_at).condition == WeatherCondition::Rain {
            cursor = departs_at + Duration::hours(params.rain_retry_hours);
            continue;
        }

        let candidates: Vec<&StationPoint> =
            stations.iter().filter(|s| s.id != station_id).collect();
        if candidates.is_empty() {
            cursor = departs_at + Duration::days(1);
            continue;
        }
        let arrival = candidates[rng.random_range(0..candidates.len())];

        let trip_minutes =
            rng.random_range(params.trip_minutes_min..=params.trip_minutes_max);
        let ends_at = departs_at + Duration::minutes(trip_minutes);
        if ends_at >= window_end {
            // Partial trip past the window is discarded.
            break;
        }

        rentals.push(PlannedRental {
            rider_id: rider_ids[rng.random_range(0..rider_ids.len())],
            departure_station_id: station_id,
            arrival_station_id: arrival.id,
            starts_at: departs_at,
            ends_at,
        });

        cursor = ends_at;
        station_id = arrival.id;
    }

    BikeHistory {
        rentals,
        final_station_id: station_id,
    }
}
