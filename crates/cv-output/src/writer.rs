//! The `OutputWriter` trait implemented by all backend writers.

use crate::{DeliveryRow, DrinkRow, OutputResult, RefillRow, RequestRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`StatisticsObserver::take_error`][crate::StatisticsObserver::take_error].
pub trait OutputWriter {
    /// Write one trip and its drink stops.
    fn write_delivery(&mut self, row: &DeliveryRow, drinks: &[DrinkRow]) -> OutputResult<()>;

    fn write_refill(&mut self, row: &RefillRow) -> OutputResult<()>;

    /// Write the final request table.
    fn write_requests(&mut self, rows: &[RequestRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
