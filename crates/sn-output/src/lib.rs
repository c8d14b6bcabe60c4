//! `sn-output`: recording a seismonet run to disk.
//!
//! | Backend | Files created                              |
//! |---------|--------------------------------------------|
//! | CSV     | `detections.csv`, `tick_summaries.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `sn_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sn_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(frames, 1.0 / 60.0, &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DetectionRow, TickSummaryRow};
pub use writer::OutputWriter;
