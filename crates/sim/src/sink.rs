//! Telemetry output sinks.
//!
//! The replay produces the same sample stream regardless of where it lands;
//! sinks decide the file layout. Two layouts exist: one JSON array per bike
//! (the compact default) and one file per sample organized by day then bike
//! (the layout the device gateway replays from).

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use velofleet_core::telemetry::TelemetrySample;
use velofleet_core::types::DbId;

use crate::error::SimError;

/// Receives every sample of a replay run.
///
/// `begin_bike`/`finish_bike` bracket the samples of one bike; samples
/// arrive in simulated-time order within that bracket.
pub trait TelemetrySink {
    fn begin_bike(&mut self, bike_id: DbId) -> Result<(), SimError>;
    fn write_sample(&mut self, sample: &TelemetrySample) -> Result<(), SimError>;
    fn finish_bike(&mut self, bike_id: DbId) -> Result<(), SimError>;
}

// ---------------------------------------------------------------------------
// One JSON array file per bike
// ---------------------------------------------------------------------------

/// Aggregates each bike's samples into `<out_dir>/velo_<id>_iot.json`.
pub struct BikeFileSink {
    out_dir: PathBuf,
    buffer: Vec<TelemetrySample>,
}

impl BikeFileSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            buffer: Vec::new(),
        }
    }
}

impl TelemetrySink for BikeFileSink {
    fn begin_bike(&mut self, _bike_id: DbId) -> Result<(), SimError> {
        self.buffer.clear();
        Ok(())
    }

    fn write_sample(&mut self, sample: &TelemetrySample) -> Result<(), SimError> {
        self.buffer.push(sample.clone());
        Ok(())
    }

    fn finish_bike(&mut self, bike_id: DbId) -> Result<(), SimError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("velo_{bike_id}_iot.json"));
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, &self.buffer)?;
        self.buffer.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// One file per sample, grouped by day then bike
// ---------------------------------------------------------------------------

/// Writes every sample to
/// `<out_dir>/<YYYY-MM-DD>/velo_<id>/<HH-MM-SS>.json`.
pub struct SampleTreeSink {
    out_dir: PathBuf,
}

impl SampleTreeSink {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }
}

impl TelemetrySink for SampleTreeSink {
    fn begin_bike(&mut self, _bike_id: DbId) -> Result<(), SimError> {
        Ok(())
    }

    fn write_sample(&mut self, sample: &TelemetrySample) -> Result<(), SimError> {
        let dir = self
            .out_dir
            .join(sample.timestamp.format("%Y-%m-%d").to_string())
            .join(format!("velo_{}", sample.bike_id));
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.json", sample.timestamp.format("%H-%M-%S")));
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(file, sample)?;
        Ok(())
    }

    fn finish_bike(&mut self, _bike_id: DbId) -> Result<(), SimError> {
        Ok(())
    }
}
