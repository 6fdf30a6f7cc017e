//! Batch simulation jobs for Velofleet.
//!
//! Three operator commands live here: database seeding, rental history
//! generation, and the telemetry feed export, plus the origin-station
//! backfill. Each is a sequential batch job; the pure algorithms they drive
//! come from `velofleet-core`.

pub mod error;
pub mod export;
pub mod history;
pub mod origins;
pub mod seed;
pub mod sink;
pub mod telemetry;

pub use error::SimError;
