//! The `OutputWriter` trait implemented by backend writers.

use crate::{DetectionRow, OutputResult, TickSummaryRow};

/// Trait implemented by output backends.
///
/// The observer never propagates these errors; it stores the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    fn write_detection(&mut self, row: &DetectionRow) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
