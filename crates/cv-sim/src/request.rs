//! Delivery requests and their lifecycle.
//!
//! # States
//!
//! ```text
//! Inactive ─► Active ─────────┐
//!    │      ─► Unprocessed ◄─►├─► Delivered ─► Completed
//!    │      ─► Unfinished  ◄─►┘
//!    └──────────────► Cancelled  (from Inactive, Unprocessed or Unfinished)
//! ```
//!
//! `Active` means every basket has a committed camel.  `Unprocessed` and
//! `Unfinished` requests sit in the retry set, ordered by `deadline -
//! arrival`, until a refill lets some warehouse serve them.
//!
//! A cancelled request may still have camels walking for it.  It is settled,
//! and can end the run, only once they are all home.
//!
//! # Accounting
//!
//! `delivered + remaining + in_flight == baskets` holds from arrival until
//! the request completes.

use std::collections::BTreeSet;
use std::fmt;

use tracing::trace;

use cv_core::{CamelId, OasisId, RequestId, SimTime};

use crate::queue::EventId;
use crate::{InvariantViolation, SimError, SimResult};

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestState {
    /// Known but not yet arrived.
    Inactive,
    /// Fully assigned to camels.
    Active,
    /// Nothing assigned yet; waiting for a refill.
    Unprocessed,
    /// Partly assigned; waiting for a refill.
    Unfinished,
    /// Every basket delivered; some camels may still be walking home.
    Delivered,
    Completed,
    Cancelled,
}

impl RequestState {
    /// `Completed` or `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Completed | RequestState::Cancelled)
    }

    /// Any state a camel has not yet been fully committed for.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            RequestState::Inactive | RequestState::Unprocessed | RequestState::Unfinished
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestState::Inactive    => "inactive",
            RequestState::Active      => "active",
            RequestState::Unprocessed => "unprocessed",
            RequestState::Unfinished  => "unfinished",
            RequestState::Delivered   => "delivered",
            RequestState::Completed   => "completed",
            RequestState::Cancelled   => "cancelled",
        };
        f.write_str(s)
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Request {
    pub id: RequestId,
    pub oasis: OasisId,
    pub baskets: u32,
    pub arrival: SimTime,
    /// Relative to `arrival`.
    pub deadline: f64,
    pub delivered: u32,
    /// Baskets not yet assigned to any camel.
    pub remaining: u32,
    /// Baskets assigned and not yet delivered.
    pub in_flight: u32,
    pub state: RequestState,
    pub delivered_at: Option<SimTime>,
    pub(crate) receive_event: Option<EventId>,
    pub(crate) fail_event: Option<EventId>,
    en_route: Vec<CamelId>,
    serving: BTreeSet<CamelId>,
}

impl Request {
    pub fn new(id: RequestId, oasis: OasisId, baskets: u32, arrival: SimTime, deadline: f64) -> Self {
        Self {
            id,
            oasis,
            baskets,
            arrival,
            deadline,
            delivered: 0,
            remaining: baskets,
            in_flight: 0,
            state: RequestState::Inactive,
            delivered_at: None,
            receive_event: None,
            fail_event: None,
            en_route: Vec::new(),
            serving: BTreeSet::new(),
        }
    }

    /// Absolute deadline.
    #[inline]
    pub fn due(&self) -> SimTime {
        self.arrival.offset(self.deadline)
    }

    /// Time left before the deadline, measured from `now`.
    #[inline]
    pub fn slack(&self, now: SimTime) -> f64 {
        self.due().since(now)
    }

    /// Camels currently carrying baskets for this request or walking home
    /// from it.
    pub fn en_route(&self) -> &[CamelId] {
        &self.en_route
    }

    /// Every camel that ever served this request.
    pub fn serving(&self) -> impl Iterator<Item = CamelId> + '_ {
        self.serving.iter().copied()
    }

    /// Whether some baskets were ever assigned.
    pub fn has_assignments(&self) -> bool {
        self.remaining < self.baskets
    }

    pub fn is_fully_delivered(&self) -> bool {
        self.delivered == self.baskets
    }

    pub fn is_accounted(&self) -> bool {
        self.delivered + self.remaining + self.in_flight == self.baskets
    }

    /// Record that `camel` carries `load` of the remaining baskets.
    pub(crate) fn assign(&mut self, camel: CamelId, load: u32) {
        debug_assert!(load <= self.remaining);
        self.remaining -= load;
        self.in_flight += load;
        self.en_route.push(camel);
        self.serving.insert(camel);
    }

    /// Record `load` baskets arriving at the oasis.
    pub(crate) fn deliver(&mut self, load: u32) {
        debug_assert!(load <= self.in_flight);
        self.in_flight = self.in_flight.saturating_sub(load);
        self.delivered += load;
    }

    /// Drop a returned camel from the en-route list.
    pub(crate) fn release(&mut self, camel: CamelId) -> Result<(), InvariantViolation> {
        let pos = self
            .en_route
            .iter()
            .position(|&c| c == camel)
            .ok_or(InvariantViolation::CamelNotEnRoute { camel, request: self.id })?;
        self.en_route.remove(pos);
        Ok(())
    }

    /// Terminal with no camel still walking for it.
    pub fn is_settled(&self) -> bool {
        self.state.is_terminal() && self.en_route.is_empty()
    }

    fn retry_key(&self) -> RetryKey {
        RetryKey {
            time_left: SimTime(self.deadline - self.arrival.0),
            arrival: self.arrival,
            id: self.id,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Request[{} oasis={} {}/{} baskets {} due {}]",
            self.id.0, self.oasis.0, self.delivered, self.baskets, self.state, self.due()
        )
    }
}

// ── Manager ───────────────────────────────────────────────────────────────────

/// Retry order: smallest `deadline - arrival`, then earliest arrival, then id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RetryKey {
    time_left: SimTime,
    arrival: SimTime,
    id: RequestId,
}

/// Owns every request and the retry set of partially served ones.
#[derive(Default)]
pub struct RequestManager {
    requests: Vec<Request>,
    retry: BTreeSet<RetryKey>,
}

impl RequestManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request.  Ids are issued sequentially.
    pub fn add(&mut self, oasis: OasisId, baskets: u32, arrival: SimTime, deadline: f64) -> RequestId {
        let id = RequestId(self.requests.len() as u32);
        self.requests.push(Request::new(id, oasis, baskets, arrival, deadline));
        id
    }

    pub fn get(&self, id: RequestId) -> SimResult<&Request> {
        self.requests.get(id.index()).ok_or(SimError::UnknownRequest(id))
    }

    pub fn get_mut(&mut self, id: RequestId) -> SimResult<&mut Request> {
        self.requests.get_mut(id.index()).ok_or(SimError::UnknownRequest(id))
    }

    pub fn set_state(&mut self, id: RequestId, state: RequestState) -> SimResult<()> {
        let request = self.get_mut(id)?;
        trace!(request = %id, from = %request.state, to = %state, "request state");
        request.state = state;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Whether every request is `Completed` or `Cancelled` with no camel
    /// still walking for it.
    pub fn all_settled(&self) -> bool {
        self.requests.iter().all(Request::is_settled)
    }

    /// First request that is not settled, if any.
    pub fn first_open(&self) -> Option<&Request> {
        self.requests.iter().find(|r| !r.is_settled())
    }

    // ── Retry set ─────────────────────────────────────────────────────────

    pub fn park(&mut self, id: RequestId) -> SimResult<()> {
        let key = self.get(id)?.retry_key();
        self.retry.insert(key);
        Ok(())
    }

    pub fn unpark(&mut self, id: RequestId) -> SimResult<bool> {
        let key = self.get(id)?.retry_key();
        Ok(self.retry.remove(&key))
    }

    pub fn is_parked(&self, id: RequestId) -> bool {
        self.get(id).is_ok_and(|r| self.retry.contains(&r.retry_key()))
    }

    /// Parked requests in retry order.
    pub fn parked(&self) -> Vec<RequestId> {
        self.retry.iter().map(|k| k.id).collect()
    }

    pub fn parked_count(&self) -> usize {
        self.retry.len()
    }
}
