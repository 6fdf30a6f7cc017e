//! Telemetry replay.
//!
//! Replays a bike's already-generated rental history at a fixed cadence,
//! producing one position/battery/status sample per step and low-battery
//! ticket drafts at trip ends. The replay itself is pure; the `sim` crate
//! feeds it database rows and routes the samples to a file sink.

use chrono::Duration;
use rand::Rng;
use serde::Serialize;

use crate::geo::{interpolate, Position, StationPoint};
use crate::params::TelemetryParams;
use crate::status::BikeStatus;
use crate::ticket::ProblemType;
use crate::types::{DbId, Timestamp};

/// One rental with its endpoint stations resolved to coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalLeg {
    pub rider_id: DbId,
    pub departure: StationPoint,
    pub arrival: StationPoint,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// One record of the telemetry feed.
///
/// Field names follow the legacy French wire format the downstream feed
/// consumers were built against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySample {
    pub timestamp: Timestamp,
    #[serde(rename = "velo_id")]
    pub bike_id: DbId,
    #[serde(rename = "statut")]
    pub status: BikeStatus,
    #[serde(rename = "batterie")]
    pub battery: f64,
    pub position: Position,
}

/// A support ticket the replay wants created.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketDraft {
    pub bike_id: DbId,
    pub rider_id: DbId,
    pub problem: ProblemType,
    pub description: String,
}

/// What one replay step produced.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub sample: TelemetrySample,
    pub ticket: Option<TicketDraft>,
}

/// Pick the station a bike's replay starts from: origin station first, then
/// current station, then the departure of its first rental. `None` means the
/// bike has no usable location at all and must be skipped.
pub fn resolve_reference_station(
    origin: Option<StationPoint>,
    current: Option<StationPoint>,
    legs: &[RentalLeg],
) -> Option<StationPoint> {
    origin
        .or(current)
        .or_else(|| legs.first().map(|leg| leg.departure))
}

/// Replay state for one bike.
///
/// `legs` must be chronologically ordered and non-overlapping, which the
/// history planner guarantees.
#[derive(Debug)]
pub struct BikeReplay<'a> {
    bike_id: DbId,
    legs: &'a [RentalLeg],
    params: &'a TelemetryParams,
    cursor: Timestamp,
    battery: f64,
    leg_idx: usize,
    station: StationPoint,
}

impl<'a> BikeReplay<'a> {
    pub fn new(
        bike_id: DbId,
        reference: StationPoint,
        legs: &'a [RentalLeg],
        start: Timestamp,
        params: &'a TelemetryParams,
    ) -> Self {
        Self {
            bike_id,
            legs,
            params,
            cursor: start,
            battery: params.initial_battery,
            leg_idx: 0,
            station: reference,
        }
    }

    /// Simulated instant the next sample will carry.
    pub fn cursor(&self) -> Timestamp {
        self.cursor
    }

    /// Emit the sample for the current instant and advance one step.
    ///
    /// At most one rental pointer advance happens per step; with the rest
    /// periods the planner guarantees, the pointer can never fall behind.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        let mut status = BikeStatus::Available;
        let mut position = self.station.position;
        let mut ticket = None;

        if let Some(leg) = self.legs.get(self.leg_idx) {
            if leg.starts_at <= self.cursor && self.cursor < leg.ends_at {
                status = BikeStatus::Rented;
                let duration_secs = (leg.ends_at - leg.starts_at).num_seconds();
                let ratio = if duration_secs > 0 {
                    (self.cursor - leg.starts_at).num_seconds() as f64 / duration_secs as f64
                } else {
                    0.0
                };
                position = interpolate(leg.departure.position, leg.arrival.position, ratio);

                let drain = if duration_secs > 0 {
                    rng.random_range(self.params.drain_min..self.params.drain_max)
                        * self.params.step_seconds as f64
                        / duration_secs as f64
                } else {
                    0.0
                };
                self.battery = (self.battery - drain).max(0.0);
            } else if self.cursor >= leg.ends_at {
                // Trip just finished. The battery check comes before the
                // probability draw so the draw is only consumed when the
                // battery is actually low.
                if self.battery < self.params.low_battery_threshold
                    && rng.random::<f64>() < self.params.ticket_probability
                {
                    ticket = Some(TicketDraft {
                        bike_id: self.bike_id,
                        rider_id: leg.rider_id,
                        problem: ProblemType::LowBattery,
                        description: format!(
                            "Batterie à {:.1}% à la fin de la location.",
                            self.battery
                        ),
                    });
                    self.battery = self.params.initial_battery;
                }
                self.station = leg.arrival;
                self.leg_idx += 1;
                position = self.station.position;
            }
        }

        let sample = TelemetrySample {
            timestamp: self.cursor,
            bike_id: self.bike_id,
            status,
            battery: round2(self.battery),
            position,
        };
        self.cursor = self.cursor + Duration::seconds(self.params.step_seconds);

        StepOutcome { sample, ticket }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn station(id: DbId, latitude: f64, longitude: f64) -> StationPoint {
        StationPoint {
            id,
            position: Position {
                latitude,
                longitude,
            },
        }
    }

    fn ts(h: u32, m: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    /// Run a replay to `end` inclusive, collecting samples and tickets.
    fn run(
        legs: &[RentalLeg],
        reference: StationPoint,
        start: Timestamp,
        end: Timestamp,
        params: &TelemetryParams,
        seed: u64,
    ) -> (Vec<TelemetrySample>, Vec<TicketDraft>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut replay = BikeReplay::new(5, reference, legs, start, params);
        let mut samples = Vec::new();
        let mut tickets = Vec::new();
        while replay.cursor() <= end {
            let outcome = replay.step(&mut rng);
            samples.push(outcome.sample);
            tickets.extend(outcome.ticket);
        }
        (samples, tickets)
    }

    fn single_leg() -> RentalLeg {
        RentalLeg {
            rider_id: 77,
            departure: station(1, 0.0, 0.0),
            arrival: station(2, 1.0, 1.0),
            starts_at: ts(10, 0),
            ends_at: ts(11, 0),
        }
    }

    #[test]
    fn no_rentals_stays_available_at_reference() {
        let reference = station(9, 48.85, 2.35);
        let (samples, tickets) = run(
            &[],
            reference,
            ts(0, 0),
            ts(1, 0),
            &TelemetryParams::default(),
            42,
        );
        // 1h inclusive at 30s cadence.
        assert_eq!(samples.len(), 121);
        for sample in &samples {
            assert_eq!(sample.status, BikeStatus::Available);
            assert_eq!(sample.battery, 100.0);
            assert_eq!(sample.position, reference.position);
        }
        assert!(tickets.is_empty());
    }

    #[test]
    fn mid_trip_sample_is_interpolated() {
        let legs = [single_leg()];
        let (samples, _) = run(
            &legs,
            legs[0].departure,
            ts(10, 0),
            ts(11, 30),
            &TelemetryParams::default(),
            42,
        );
        let half = samples
            .iter()
            .find(|s| s.timestamp == ts(10, 30))
            .expect("10:30 sample");
        assert_eq!(half.status, BikeStatus::Rented);
        assert!((half.position.latitude - 0.5).abs() < 1e-9);
        assert!((half.position.longitude - 0.5).abs() < 1e-9);
    }

    #[test]
    fn trip_start_sample_sits_at_departure() {
        let legs = [single_leg()];
        let (samples, _) = run(
            &legs,
            legs[0].departure,
            ts(10, 0),
            ts(11, 30),
            &TelemetryParams::default(),
            42,
        );
        let first = &samples[0];
        assert_eq!(first.timestamp, ts(10, 0));
        assert_eq!(first.status, BikeStatus::Rented);
        assert_eq!(first.position, legs[0].departure.position);
    }

    #[test]
    fn trip_end_sample_sits_at_arrival_and_is_available() {
        let legs = [single_leg()];
        let (samples, _) = run(
            &legs,
            legs[0].departure,
            ts(10, 0),
            ts(11, 30),
            &TelemetryParams::default(),
            42,
        );
        let end = samples
            .iter()
            .find(|s| s.timestamp == ts(11, 0))
            .expect("11:00 sample");
        assert_eq!(end.status, BikeStatus::Available);
        assert_eq!(end.position, legs[0].arrival.position);
        // Every later sample stays docked at the arrival.
        for sample in samples.iter().filter(|s| s.timestamp > ts(11, 0)) {
            assert_eq!(sample.position, legs[0].arrival.position);
        }
    }

    #[test]
    fn battery_stays_within_bounds() {
        // A drain far above 100% per step must floor at zero, never go
        // negative.
        let params = TelemetryParams {
            drain_min: 5000.0,
            drain_max: 5001.0,
            ticket_probability: 0.0,
            ..TelemetryParams::default()
        };
        let legs = [single_leg()];
        let (samples, _) = run(&legs, legs[0].departure, ts(10, 0), ts(11, 30), &params, 42);
        for sample in &samples {
            assert!((0.0..=100.0).contains(&sample.battery), "{}", sample.battery);
        }
        let depleted = samples
            .iter()
            .find(|s| s.timestamp == ts(10, 30))
            .expect("10:30 sample");
        assert_eq!(depleted.battery, 0.0);
    }

    #[test]
    fn low_battery_raises_ticket_and_resets() {
        let params = TelemetryParams {
            drain_min: 5000.0,
            drain_max: 5001.0,
            ticket_probability: 1.0,
            ..TelemetryParams::default()
        };
        let legs = [single_leg()];
        let (samples, tickets) =
            run(&legs, legs[0].departure, ts(10, 0), ts(11, 30), &params, 42);
        assert_eq!(tickets.len(), 1);
        let ticket = &tickets[0];
        assert_eq!(ticket.bike_id, 5);
        assert_eq!(ticket.rider_id, 77);
        assert_eq!(ticket.problem, ProblemType::LowBattery);
        assert!(ticket.description.contains("0.0%"), "{}", ticket.description);
        // The battery swap happens before the trip-end sample is emitted.
        let end = samples
            .iter()
            .find(|s| s.timestamp == ts(11, 0))
            .expect("11:00 sample");
        assert_eq!(end.battery, 100.0);
    }

    #[test]
    fn ticket_gate_at_zero_probability_never_fires() {
        let params = TelemetryParams {
            drain_min: 5000.0,
            drain_max: 5001.0,
            ticket_probability: 0.0,
            ..TelemetryParams::default()
        };
        let legs = [single_leg()];
        let (_, tickets) = run(&legs, legs[0].departure, ts(10, 0), ts(11, 30), &params, 42);
        assert!(tickets.is_empty());
    }

    #[test]
    fn healthy_battery_never_tickets() {
        // Default drain over a 1h trip loses well under 90%, so the battery
        // never crosses the threshold.
        let (_, tickets) = run(
            &[single_leg()],
            single_leg().departure,
            ts(10, 0),
            ts(11, 30),
            &TelemetryParams::default(),
            42,
        );
        assert!(tickets.is_empty());
    }

    #[test]
    fn zero_duration_leg_pins_ratio_and_drain() {
        let leg = RentalLeg {
            rider_id: 77,
            departure: station(1, 0.0, 0.0),
            arrival: station(2, 1.0, 1.0),
            starts_at: ts(10, 0),
            ends_at: ts(10, 0),
        };
        // starts_at == ends_at never matches the in-progress branch, so the
        // bike just completes the leg and docks at the arrival.
        let (samples, _) = run(
            &[leg],
            leg.departure,
            ts(10, 0),
            ts(10, 5),
            &TelemetryParams::default(),
            42,
        );
        assert_eq!(samples[0].position, leg.arrival.position);
        assert_eq!(samples[0].battery, 100.0);
    }

    #[test]
    fn second_leg_departs_from_first_arrival() {
        let first = single_leg();
        let second = RentalLeg {
            rider_id: 78,
            departure: station(2, 1.0, 1.0),
            arrival: station(3, 2.0, 0.0),
            starts_at: ts(13, 0),
            ends_at: ts(14, 0),
        };
        let legs = [first, second];
        let (samples, _) = run(
            &legs,
            first.departure,
            ts(10, 0),
            ts(15, 0),
            &TelemetryParams::default(),
            42,
        );
        // Between the trips the bike reports from the first arrival.
        let idle = samples
            .iter()
            .find(|s| s.timestamp == ts(12, 0))
            .expect("12:00 sample");
        assert_eq!(idle.status, BikeStatus::Available);
        assert_eq!(idle.position, first.arrival.position);
        // And the final dock is the second arrival.
        let last = samples.last().unwrap();
        assert_eq!(last.position, second.arrival.position);
    }

    #[test]
    fn resolution_prefers_origin() {
        let origin = station(1, 0.0, 0.0);
        let current = station(2, 1.0, 1.0);
        assert_eq!(
            resolve_reference_station(Some(origin), Some(current), &[single_leg()]),
            Some(origin)
        );
    }

    #[test]
    fn resolution_falls_back_to_current() {
        let current = station(2, 1.0, 1.0);
        assert_eq!(
            resolve_reference_station(None, Some(current), &[]),
            Some(current)
        );
    }

    #[test]
    fn resolution_falls_back_to_first_departure() {
        assert_eq!(
            resolve_reference_station(None, None, &[single_leg()]),
            Some(single_leg().departure)
        );
    }

    #[test]
    fn resolution_gives_up_when_nothing_applies() {
        assert_eq!(resolve_reference_station(None, None, &[]), None);
    }

    #[test]
    fn sample_uses_legacy_field_names() {
        let sample = TelemetrySample {
            timestamp: ts(10, 0),
            bike_id: 5,
            status: BikeStatus::Available,
            battery: 99.5,
            position: Position {
                latitude: 45.75,
                longitude: 4.85,
            },
        };
        let value = serde_json::to_value(&sample).unwrap();
        assert_eq!(value["velo_id"], 5);
        assert_eq!(value["statut"], "disponible");
        assert_eq!(value["batterie"], 99.5);
        assert_eq!(value["position"]["latitude"], 45.75);
        assert!(value["timestamp"].as_str().unwrap().starts_with("2025-06-01T10:00:00"));
    }
}
