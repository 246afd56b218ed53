//! The single ordered event queue.
//!
//! # Ordering
//!
//! Events pop in ascending time, then descending priority, then insertion
//! order.  The last key makes same-time same-priority events FIFO, so a run
//! is reproducible from its seed.
//!
//! # Cancellation
//!
//! Every scheduled event gets an [`EventId`].  Cancelling looks the key up
//! in a side index and removes the entry; cancelling an id that already ran
//! or was never issued is an invariant violation.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use cv_core::SimTime;

use crate::event::Event;
use crate::InvariantViolation;

/// Identity of one scheduled event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct EventKey {
    time: SimTime,
    priority: Reverse<i32>,
    seq: u64,
}

#[derive(Default)]
pub struct EventQueue {
    events: BTreeMap<EventKey, Event>,
    index: FxHashMap<EventId, EventKey>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, time: SimTime, event: Event) -> EventId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let key = EventKey { time, priority: Reverse(event.priority()), seq };
        let id = EventId(seq);
        self.events.insert(key, event);
        self.index.insert(id, key);
        id
    }

    /// Remove a queued event and hand it back.
    pub fn cancel(&mut self, id: EventId) -> Result<Event, InvariantViolation> {
        let key = self.index.remove(&id).ok_or(InvariantViolation::EventNotQueued(id))?;
        self.events.remove(&key).ok_or(InvariantViolation::EventNotQueued(id))
    }

    /// Pop the globally earliest event.
    pub fn pop(&mut self) -> Option<(EventId, SimTime, Event)> {
        let (key, event) = self.events.pop_first()?;
        let id = EventId(key.seq);
        self.index.remove(&id);
        Some((id, key.time, event))
    }

    /// Time of the next event, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.events.first_key_value().map(|(k, _)| k.time)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
