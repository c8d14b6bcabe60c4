//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `detections.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DetectionRow, OutputResult, TickSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    detections: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut detections = Writer::from_path(dir.join("detections.csv"))?;
        detections.write_record([
            "tick",
            "time_secs",
            "wave_id",
            "node_id",
            "x",
            "y",
            "distance_px",
            "order",
            "origin_node",
            "informed",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "time_secs",
            "dt_secs",
            "active_waves",
            "retired_waves",
            "detections",
            "detected_total",
            "locks",
            "site_changes",
        ])?;

        Ok(Self {
            detections,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_detection(&mut self, row: &DetectionRow) -> OutputResult<()> {
        self.detections.write_record(&[
            row.tick.to_string(),
            format!("{:.6}", row.time_secs),
            row.wave_id.to_string(),
            row.node_id.to_string(),
            format!("{:.3}", row.x),
            format!("{:.3}", row.y),
            format!("{:.3}", row.distance_px),
            row.order.to_string(),
            row.origin_node.to_string(),
            row.informed.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.6}", row.time_secs),
            format!("{:.6}", row.dt_secs),
            row.active_waves.to_string(),
            row.retired_waves.to_string(),
            row.detections.to_string(),
            row.detected_total.to_string(),
            row.locks.to_string(),
            row.site_changes.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.detections.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
