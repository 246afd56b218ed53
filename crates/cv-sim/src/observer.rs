//! Simulation observer trait and the records it receives.

use std::fmt;

use cv_core::{CamelId, CamelTypeId, NodeId, OasisId, RequestId, SimTime, WarehouseId};
use cv_fleet::TripPlan;

use crate::event::Event;
use crate::request::{Request, RequestManager};

// ── Records ───────────────────────────────────────────────────────────────────

/// One camel trip, reported once when the camel departs.
#[derive(Clone, Debug, PartialEq)]
pub struct TripRecord {
    pub camel: CamelId,
    pub kind: CamelTypeId,
    pub generated_at: SimTime,
    pub request: RequestId,
    pub warehouse: WarehouseId,
    pub oasis: OasisId,
    pub plan: TripPlan,
}

/// One warehouse refill.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RefillRecord {
    pub warehouse: WarehouseId,
    pub time: SimTime,
    pub before: u32,
    pub after: u32,
}

/// End-of-run totals.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSummary {
    pub time: SimTime,
    pub baskets_delivered: u64,
    pub baskets_requested: u64,
    pub requests_fulfilled: u32,
    pub requests_cancelled: u32,
    pub requests_total: u32,
    pub camels_used: usize,
    /// Camels generated per type, indexed by `CamelTypeId`.
    pub camels_by_type: Vec<usize>,
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: delivered {}/{} baskets, fulfilled {}/{} requests ({} cancelled), {} camels used",
            self.time,
            self.baskets_delivered,
            self.baskets_requested,
            self.requests_fulfilled,
            self.requests_total,
            self.requests_cancelled,
            self.camels_used,
        )
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Callbacks invoked while the kernel processes events.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Deliveries(u32);
///
/// impl SimObserver for Deliveries {
///     fn on_trip(&mut self, trip: &TripRecord) {
///         self.0 += trip.plan.load;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before each event is processed.
    fn on_event(&mut self, _time: SimTime, _event: &Event) {}

    /// A camel departed; the record carries its whole timed trip.
    fn on_trip(&mut self, _trip: &TripRecord) {}

    fn on_drink(&mut self, _time: SimTime, _camel: CamelId, _node: NodeId) {}

    /// A camel passed an intermediate oasis without stopping.
    fn on_walk(&mut self, _time: SimTime, _camel: CamelId, _node: NodeId) {}

    fn on_refill(&mut self, _refill: &RefillRecord) {}

    /// A request reached `Delivered` or `Completed`.
    fn on_request_state(&mut self, _time: SimTime, _request: &Request) {}

    /// Called once when the run finishes normally, with every request in
    /// its final state.
    fn on_sim_end(&mut self, _summary: &SimSummary, _requests: &RequestManager) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
