//! Simulation parameters.
//!
//! The drain formula and the low-battery ticket gate are empirically chosen
//! constants carried over from the original feed generator; they are kept as
//! fields rather than hard-coded so test fixtures and future tuning can
//! override them without touching the algorithms.

// ---------------------------------------------------------------------------
// History generation defaults
// ---------------------------------------------------------------------------

/// Minimum rest between two rentals of the same bike, in hours.
pub const DEFAULT_REST_HOURS_MIN: f64 = 1.0;
/// Maximum rest between two rentals of the same bike, in hours.
pub const DEFAULT_REST_HOURS_MAX: f64 = 48.0;
/// Extra delay applied after a rained-out departure attempt, in hours.
pub const DEFAULT_RAIN_RETRY_HOURS: i64 = 1;
/// Shortest trip, in minutes.
pub const DEFAULT_TRIP_MINUTES_MIN: i64 = 10;
/// Longest trip, in minutes.
pub const DEFAULT_TRIP_MINUTES_MAX: i64 = 120;

/// Tuning knobs for the rental history planner.
#[derive(Debug, Clone)]
pub struct HistoryParams {
    pub rest_hours_min: f64,
    pub rest_hours_max: f64,
    pub rain_retry_hours: i64,
    pub trip_minutes_min: i64,
    pub trip_minutes_max: i64,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self {
            rest_hours_min: DEFAULT_REST_HOURS_MIN,
            rest_hours_max: DEFAULT_REST_HOURS_MAX,
            rain_retry_hours: DEFAULT_RAIN_RETRY_HOURS,
            trip_minutes_min: DEFAULT_TRIP_MINUTES_MIN,
            trip_minutes_max: DEFAULT_TRIP_MINUTES_MAX,
        }
    }
}

// ---------------------------------------------------------------------------
// Telemetry replay defaults
// ---------------------------------------------------------------------------

/// Simulated seconds between two telemetry samples.
pub const DEFAULT_STEP_SECONDS: i64 = 30;
/// Lower bound of the per-trip battery drain draw, in percent.
pub const DEFAULT_DRAIN_MIN: f64 = 10.0;
/// Upper bound of the per-trip battery drain draw, in percent.
pub const DEFAULT_DRAIN_MAX: f64 = 25.0;
/// Battery percentage under which a trip end may raise a ticket.
pub const DEFAULT_LOW_BATTERY_THRESHOLD: f64 = 10.0;
/// Probability that a low battery at trip end actually raises a ticket.
pub const DEFAULT_TICKET_PROBABILITY: f64 = 0.8;
/// Battery level bikes start the replay with, and reset to after a swap.
pub const DEFAULT_INITIAL_BATTERY: f64 = 100.0;

/// Tuning knobs for the telemetry replay.
#[derive(Debug, Clone)]
pub struct TelemetryParams {
    pub step_seconds: i64,
    pub drain_min: f64,
    pub drain_max: f64,
    pub low_battery_threshold: f64,
    pub ticket_probability: f64,
    pub initial_battery: f64,
}

impl Default for TelemetryParams {
    fn default() -> Self {
        Self {
            step_seconds: DEFAULT_STEP_SECONDS,
            drain_min: DEFAULT_DRAIN_MIN,
            drain_max: DEFAULT_DRAIN_MAX,
            low_battery_threshold: DEFAULT_LOW_BATTERY_THRESHOLD,
            ticket_probability: DEFAULT_TICKET_PROBABILITY,
            initial_battery: DEFAULT_INITIAL_BATTERY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_defaults_match_constants() {
        let params = HistoryParams::default();
        assert_eq!(params.rest_hours_min, DEFAULT_REST_HOURS_MIN);
        assert_eq!(params.rest_hours_max, DEFAULT_REST_HOURS_MAX);
        assert_eq!(params.trip_minutes_max, DEFAULT_TRIP_MINUTES_MAX);
    }

    #[test]
    fn telemetry_defaults_match_constants() {
        let params = TelemetryParams::default();
        assert_eq!(params.step_seconds, DEFAULT_STEP_SECONDS);
        assert_eq!(params.ticket_probability, DEFAULT_TICKET_PROBABILITY);
        assert_eq!(params.initial_battery, DEFAULT_INITIAL_BATTERY);
    }
}
