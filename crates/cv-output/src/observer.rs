//! `StatisticsObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tracing::warn;

use cv_core::SimTime;
use cv_sim::{RefillRecord, Request, RequestManager, SimObserver, SimSummary, TripRecord};

use crate::row::{DeliveryRow, DrinkRow, RefillRow, RequestRow};
use crate::stats::Statistics;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that keeps [`Statistics`] in memory and streams rows to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct StatisticsObserver<W: OutputWriter> {
    writer:     W,
    stats:      Statistics,
    last_error: Option<OutputError>,
    flushed:    bool,
}

impl<W: OutputWriter> StatisticsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, stats: Statistics::new(), last_error: None, flushed: false }
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write the request table and flush.  For runs that stop without
    /// finishing (pause, deadline breach) where `on_sim_end` never fires.
    ///
    /// Fails with [`OutputError::AlreadyFlushed`] on a second call.
    pub fn flush(&mut self, requests: &RequestManager) -> OutputResult<()> {
        if self.flushed {
            return Err(OutputError::AlreadyFlushed);
        }
        self.flushed = true;
        let rows: Vec<RequestRow> = requests.iter().map(RequestRow::from).collect();
        self.writer.write_requests(&rows)?;
        self.writer.finish()
    }

    pub fn into_parts(self) -> (W, Statistics) {
        (self.writer, self.stats)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "statistics write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for StatisticsObserver<W> {
    fn on_trip(&mut self, trip: &TripRecord) {
        self.stats.record_trip(trip);
        let result = self.writer.write_delivery(&DeliveryRow::from_trip(trip), &DrinkRow::from_trip(trip));
        self.store_err(result);
    }

    fn on_refill(&mut self, refill: &RefillRecord) {
        self.stats.record_refill(refill);
        let result = self.writer.write_refill(&RefillRow::from(refill));
        self.store_err(result);
    }

    fn on_request_state(&mut self, time: SimTime, request: &Request) {
        self.stats.on_request_state(time, request);
    }

    fn on_sim_end(&mut self, summary: &SimSummary, requests: &RequestManager) {
        self.stats.on_sim_end(summary, requests);
        let result = self.flush(requests);
        self.store_err(result);
    }
}
