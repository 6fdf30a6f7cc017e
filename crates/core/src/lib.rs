//! Pure domain logic for the Velofleet bike-share backend.
//!
//! Everything in this crate is synchronous and side-effect free so it can be
//! exercised directly in unit tests. Persistence lives in `velofleet-db`,
//! batch orchestration and file output in `velofleet-sim`.

pub mod geo;
pub mod history;
pub mod params;
pub mod status;
pub mod telemetry;
pub mod ticket;
pub mod types;
pub mod weather;
