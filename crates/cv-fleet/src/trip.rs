//! Trip timing: feasibility checks and committed trip plans.
//!
//! # Timing model
//!
//! A trip is: load the baskets at the home warehouse, walk the outbound path,
//! unload at the oasis, walk the same nodes back.  Loading and unloading each
//! cost `load × manipulation_time`.  Each hop costs `length / speed`; before a
//! hop longer than the remaining range, the camel drinks at the hop's start
//! node (costing `drink_time`) and its range resets to the maximum.  A hop
//! longer than the maximum range can never be walked.
//!
//! Both [`Camel::can_deliver_in_time`] and [`Camel::plan_trip`] step through
//! hops with the same walker, so a committed plan always reproduces the
//! timing its feasibility check saw.
//!
//! The feasibility check covers the delivery leg (load, outbound, unload)
//! against the request's slack; the return leg does not affect a deadline.

use cv_core::{NodeId, SimTime};
use cv_spatial::PathDescriptor;

use crate::camel::Camel;

// ── Walker ────────────────────────────────────────────────────────────────────

/// Running clock and remaining range for one camel on one trip.
struct Walker {
    speed: f64,
    max_range: f64,
    drink_time: f64,
    remaining: f64,
    elapsed: f64,
}

impl Walker {
    fn new(camel: &Camel, start: f64) -> Self {
        Self {
            speed: camel.speed,
            max_range: camel.range,
            drink_time: camel.drink_time,
            remaining: camel.range,
            elapsed: start,
        }
    }

    /// Walk one hop of `length`.  Returns the drink start time when the camel
    /// had to drink before setting off.
    fn hop(&mut self, length: f64) -> Option<f64> {
        let mut drank = None;
        if length > self.remaining {
            drank = Some(self.elapsed);
            self.elapsed += self.drink_time;
            self.remaining = self.max_range;
        }
        self.remaining -= length;
        self.elapsed += length / self.speed;
        drank
    }
}

// ── Trip plan ─────────────────────────────────────────────────────────────────

/// One timed step of a committed trip.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TripStep {
    /// The camel starts drinking at `node` at time `at`.
    Drink { node: NodeId, at: SimTime },
    /// The camel reaches `node` at time `at`.  `notable` marks arrivals worth
    /// reporting: an oasis that is neither the leg's end nor a drink stop.
    Arrive { node: NodeId, at: SimTime, notable: bool },
}

impl TripStep {
    pub fn at(&self) -> SimTime {
        match *self {
            TripStep::Drink { at, .. } | TripStep::Arrive { at, .. } => at,
        }
    }
}

/// A fully timed trip, produced once when the camel departs.
#[derive(Clone, Debug, PartialEq)]
pub struct TripPlan {
    pub load: u32,
    /// Time loading finished and the camel set off.
    pub departs_at: SimTime,
    pub outbound: Vec<TripStep>,
    /// Arrival at the oasis, before unloading.
    pub delivers_at: SimTime,
    pub inbound: Vec<TripStep>,
    /// Arrival back at the home warehouse.
    pub returns_at: SimTime,
    /// Outbound node sequence.
    pub path: Vec<NodeId>,
    /// Round-trip distance.
    pub walked: f64,
}

impl TripPlan {
    /// Every drink stop on the trip as `(time, node)`.
    pub fn drinks(&self) -> impl Iterator<Item = (SimTime, NodeId)> + '_ {
        self.outbound.iter().chain(self.inbound.iter()).filter_map(|s| match *s {
            TripStep::Drink { node, at } => Some((at, node)),
            TripStep::Arrive { .. } => None,
        })
    }
}

/// Walk a sequence of hops, recording steps.  Marks which arrivals are
/// notable once the leg is complete.
fn walk_leg(
    walker: &mut Walker,
    hops: impl Iterator<Item = (NodeId, NodeId, f64)>,
    warehouse_count: usize,
) -> Vec<TripStep> {
    let mut steps = Vec::new();
    for (from, to, length) in hops {
        if let Some(at) = walker.hop(length) {
            steps.push(TripStep::Drink { node: from, at: SimTime(at) });
        }
        steps.push(TripStep::Arrive {
            node: to,
            at: SimTime(walker.elapsed),
            notable: to.is_oasis(warehouse_count),
        });
    }

    // The leg's final arrival and arrivals followed by a drink are not notable.
    let last_arrival = steps.iter().rposition(|s| matches!(s, TripStep::Arrive { .. }));
    for k in 0..steps.len() {
        let followed_by_drink = matches!(steps.get(k + 1), Some(TripStep::Drink { .. }));
        if let TripStep::Arrive { notable, .. } = &mut steps[k] {
            if followed_by_drink || Some(k) == last_arrival {
                *notable = false;
            }
        }
    }
    steps
}

// ── Camel trip operations ─────────────────────────────────────────────────────

impl Camel {
    /// Whether this camel can load `load` baskets, walk `path`, and unload
    /// within `slack` time units.
    ///
    /// Stops early once elapsed time exceeds `slack`.  Pure; never mutates.
    pub fn can_deliver_in_time(
        &self,
        path: &PathDescriptor,
        load: u32,
        manipulation_time: f64,
        slack: f64,
    ) -> bool {
        if !path.is_reachable() {
            return false;
        }
        let mut walker = Walker::new(self, 2.0 * load as f64 * manipulation_time);
        for &length in &path.partial_distances {
            if walker.elapsed > slack {
                return false;
            }
            if length > self.range {
                return false;
            }
            walker.hop(length);
        }
        walker.elapsed <= slack
    }

    /// Time the delivery leg would take, or `None` if some hop is longer than
    /// this camel's range.
    pub fn delivery_duration(
        &self,
        path: &PathDescriptor,
        load: u32,
        manipulation_time: f64,
    ) -> Option<f64> {
        if !path.is_reachable() || path.partial_distances.iter().any(|&d| d > self.range) {
            return None;
        }
        let mut walker = Walker::new(self, 2.0 * load as f64 * manipulation_time);
        for &length in &path.partial_distances {
            walker.hop(length);
        }
        Some(walker.elapsed)
    }

    /// Time every step of a trip starting at `now` with the camel's current
    /// load.
    ///
    /// Range is not reset at the oasis; the return leg re-evaluates drink
    /// stops on its own.
    pub fn plan_trip(
        &self,
        path: &PathDescriptor,
        now: SimTime,
        manipulation_time: f64,
        warehouse_count: usize,
    ) -> TripPlan {
        let handling = self.load as f64 * manipulation_time;
        let mut walker = Walker::new(self, now.0 + handling);
        let departs_at = SimTime(walker.elapsed);

        let outbound = walk_leg(&mut walker, path.hops(), warehouse_count);
        let delivers_at = SimTime(walker.elapsed);

        walker.elapsed += handling;
        let back = path.reversed();
        let inbound = walk_leg(&mut walker, back.hops(), warehouse_count);
        let returns_at = SimTime(walker.elapsed);

        TripPlan {
            load: self.load,
            departs_at,
            outbound,
            delivers_at,
            inbound,
            returns_at,
            path: path.nodes.clone(),
            walked: 2.0 * path.distance,
        }
    }
}
