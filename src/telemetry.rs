//! Per-frame trace of the rig, written out as CSV.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row per `update`; flat so it maps onto CSV columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub time: f64,
    pub step: String,
    pub rotation: f64,
    pub trolley_offset: f64,
    pub hook_height: f64,
    pub claw_angle: f64,
    pub claw_x: f64,
    pub claw_y: f64,
    pub claw_z: f64,
    pub queued: usize,
    pub delivered: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FrameTrace {
    records: Vec<FrameRecord>,
}

impl FrameTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: FrameRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[FrameRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&FrameRecord> {
        self.records.last()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Header row followed by every recorded frame
    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), TelemetryError> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in &self.records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), TelemetryError> {
        let file = File::create(path)?;
        self.to_writer(file)
    }
}
