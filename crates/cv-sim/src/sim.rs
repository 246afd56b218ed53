//! The `Sim` struct and its event loop.

use std::sync::Arc;

use tracing::{debug, info, warn};

use cv_core::{CamelId, NodeId, OasisId, RequestId, SimConfig, SimTime, WarehouseId};
use cv_fleet::{Fleet, TripStep};
use cv_spatial::{Network, PathDescriptor};

use crate::dispatch::Dispatcher;
use crate::event::Event;
use crate::queue::{EventId, EventQueue};
use crate::request::{RequestManager, RequestState};
use crate::warehouse::Warehouse;
use crate::{
    InvariantViolation, RefillRecord, SimError, SimObserver, SimResult, SimSummary, TripRecord,
};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Result of processing one event.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Processed(SimTime),
    Paused(SimTime),
    Finished(SimSummary),
    /// The queue is empty.
    Idle,
}

/// Why a run loop returned.
#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    Finished(SimSummary),
    Paused(SimTime),
    /// [`Sim::run_until`] reached its horizon.
    Reached(SimTime),
    /// The queue ran dry before the end condition held.
    Idle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Finished,
    Halted,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns every entity and the event queue.  State only changes inside
/// [`Sim::advance`] (one event, processed to completion) or through the
/// control methods [`Sim::submit`], [`Sim::cancel`] and [`Sim::pause_at`].
///
/// Any error returned while processing an event halts the run; afterwards
/// every `advance` returns [`SimError::Halted`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,
    pub network: Network,
    pub warehouses: Vec<Warehouse>,
    pub fleet: Fleet,
    pub requests: RequestManager,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) queue: EventQueue,
    pub(crate) now: SimTime,
    status: Status,
    end_event: Option<EventId>,
    baskets_delivered: u64,
    requests_fulfilled: u32,
}

impl Sim {
    pub(crate) fn new(
        config: SimConfig,
        network: Network,
        dispatcher: Dispatcher,
        warehouses: Vec<Warehouse>,
        fleet: Fleet,
    ) -> Self {
        let mut queue = EventQueue::new();
        for w in &warehouses {
            queue.schedule(SimTime(w.refill_interval), Event::BasketRefill { warehouse: w.id });
        }
        Self {
            config,
            network,
            warehouses,
            fleet,
            requests: RequestManager::new(),
            dispatcher,
            queue,
            now: SimTime::ZERO,
            status: Status::Running,
            end_event: None,
            baskets_delivered: 0,
            requests_fulfilled: 0,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn request_state(&self, id: RequestId) -> SimResult<RequestState> {
        Ok(self.requests.get(id)?.state)
    }

    /// Every camel that served the request so far.
    pub fn serving_camels(&self, id: RequestId) -> SimResult<Vec<CamelId>> {
        Ok(self.requests.get(id)?.serving().collect())
    }

    pub fn summary(&self) -> SimSummary {
        let mut requested = 0u64;
        let mut cancelled = 0u32;
        for r in self.requests.iter() {
            requested += r.baskets as u64;
            if r.state == RequestState::Cancelled {
                cancelled += 1;
            }
        }
        SimSummary {
            time: self.now,
            baskets_delivered: self.baskets_delivered,
            baskets_requested: requested,
            requests_fulfilled: self.requests_fulfilled,
            requests_cancelled: cancelled,
            requests_total: self.requests.len() as u32,
            camels_used: self.fleet.len(),
            camels_by_type: self.fleet.camels.count_by_type(self.fleet.factory.types().len()),
        }
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Add a request arriving at `arrival` (not before the current time).
    pub fn submit(
        &mut self,
        oasis: OasisId,
        baskets: u32,
        arrival: SimTime,
        deadline: f64,
    ) -> SimResult<RequestId> {
        self.ensure_running()?;
        if arrival < self.now {
            return Err(SimError::InThePast { at: arrival, now: self.now });
        }
        if oasis.index() >= self.network.oasis_count() {
            return Err(SimError::Config(format!("request names unknown oasis {oasis}")));
        }
        if baskets == 0 {
            return Err(SimError::Config("request must ask for at least one basket".into()));
        }
        if !deadline.is_finite() || deadline < 0.0 || !arrival.0.is_finite() {
            return Err(SimError::Config(format!("invalid request timing: arrival {arrival}, deadline {deadline}")));
        }

        let id = self.requests.add(oasis, baskets, arrival, deadline);
        let receive = self.queue.schedule(arrival, Event::RequestReceive { request: id });
        self.requests.get_mut(id)?.receive_event = Some(receive);
        if let Some(end) = self.end_event.take() {
            self.cancel_event(end)?;
        }
        debug!(request = %id, %oasis, baskets, %arrival, deadline, "request submitted");
        Ok(id)
    }

    /// Cancel a request that is `Inactive`, `Unprocessed` or `Unfinished`.
    ///
    /// Camels already walking for it finish their trips; their baskets count
    /// as delivered but the request stays `Cancelled`.
    pub fn cancel(&mut self, id: RequestId) -> SimResult<()> {
        self.ensure_running()?;
        let request = self.requests.get_mut(id)?;
        if !request.state.is_cancellable() {
            return Err(SimError::NotCancellable { request: id, state: request.state });
        }
        let receive = request.receive_event.take();
        let fail = request.fail_event.take();
        let en_route = request.en_route().len();
        request.state = RequestState::Cancelled;
        for event in receive.into_iter().chain(fail) {
            self.cancel_event(event)?;
        }
        self.requests.unpark(id)?;
        info!(request = %id, en_route, "request cancelled");
        self.test_end();
        Ok(())
    }

    /// Stop [`Sim::run`] once the clock reaches `at`.
    pub fn pause_at(&mut self, at: SimTime) -> SimResult<EventId> {
        self.ensure_running()?;
        if at < self.now {
            return Err(SimError::InThePast { at, now: self.now });
        }
        Ok(self.queue.schedule(at, Event::Pause))
    }

    // ── Run loops ─────────────────────────────────────────────────────────

    /// Process events until the run finishes, pauses or the queue empties.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        loop {
            match self.advance(observer)? {
                Step::Processed(_) => {}
                Step::Paused(t) => return Ok(RunOutcome::Paused(t)),
                Step::Finished(summary) => return Ok(RunOutcome::Finished(summary)),
                Step::Idle => return Ok(RunOutcome::Idle),
            }
        }
    }

    /// Process every event scheduled at or before `horizon`, then move the
    /// clock to `horizon`.
    pub fn run_until<O: SimObserver>(
        &mut self,
        horizon: SimTime,
        observer: &mut O,
    ) -> SimResult<RunOutcome> {
        while self.queue.peek_time().is_some_and(|t| t <= horizon) {
            match self.advance(observer)? {
                Step::Processed(_) => {}
                Step::Paused(t) => return Ok(RunOutcome::Paused(t)),
                Step::Finished(summary) => return Ok(RunOutcome::Finished(summary)),
                Step::Idle => return Ok(RunOutcome::Idle),
            }
        }
        if horizon > self.now {
            self.now = horizon;
        }
        Ok(RunOutcome::Reached(horizon))
    }

    /// Pop the earliest event, move the clock to it and process it.
    pub fn advance<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Step> {
        match self.status {
            Status::Halted => return Err(SimError::Halted),
            Status::Finished => return Ok(Step::Finished(self.summary())),
            Status::Running => {}
        }
        let Some((_, time, event)) = self.queue.pop() else {
            return Ok(Step::Idle);
        };
        debug_assert!(time >= self.now, "event at {time} behind clock {}", self.now);
        self.now = time;
        observer.on_event(time, &event);

        match self.process(event, observer) {
            Ok(step) => Ok(step),
            Err(e) => {
                warn!(error = %e, time = %self.now, "simulation halted");
                self.status = Status::Halted;
                Err(e)
            }
        }
    }

    // ── Event processing ──────────────────────────────────────────────────

    fn process<O: SimObserver>(&mut self, event: Event, observer: &mut O) -> SimResult<Step> {
        match event {
            Event::RequestReceive { request } => self.on_receive(request)?,
            Event::RequestFail { request } => {
                warn!(%request, time = %self.now, "request missed its deadline");
                return Err(SimError::DeadlineBreach { request, time: self.now });
            }
            Event::RequestFulfilled { request } => self.on_fulfilled(request, observer)?,
            Event::CamelPrepare { camel, request, path } => {
                self.on_prepare(camel, request, path, observer)?
            }
            Event::CamelDrink { camel, node } => {
                self.fleet.camel_mut(camel)?.location = node;
                debug!(%camel, %node, time = %self.now, "camel drinks");
                observer.on_drink(self.now, camel, node);
            }
            Event::CamelWalk { camel, node, notable } => {
                self.fleet.camel_mut(camel)?.location = node;
                if notable {
                    debug!(%camel, %node, time = %self.now, "camel passes oasis");
                    observer.on_walk(self.now, camel, node);
                }
            }
            Event::CamelDeliver { camel, request } => self.on_deliver(camel, request)?,
            Event::CamelReturn { camel, request } => self.on_return(camel, request, observer)?,
            Event::BasketRefill { warehouse } => self.on_refill(warehouse, observer)?,
            Event::Pause => {
                info!(time = %self.now, "simulation paused");
                return Ok(Step::Paused(self.now));
            }
            Event::SimulationEnd => return self.on_end(observer).map(Step::Finished),
        }
        Ok(Step::Processed(self.now))
    }

    fn on_receive(&mut self, id: RequestId) -> SimResult<()> {
        let request = self.requests.get_mut(id)?;
        request.receive_event = None;
        let due = request.due();
        request.fail_event = Some(self.queue.schedule(due, Event::RequestFail { request: id }));
        info!(
            request = %id,
            oasis = %request.oasis,
            baskets = request.baskets,
            %due,
            "request received"
        );
        self.process_request(id)
    }

    fn on_prepare<O: SimObserver>(
        &mut self,
        camel: CamelId,
        request: RequestId,
        path: Arc<PathDescriptor>,
        observer: &mut O,
    ) -> SimResult<()> {
        let c = self.fleet.camel(camel)?;
        let home = c.home;
        let manipulation = self.warehouses[home.index()].manipulation_time;
        let plan = c.plan_trip(&path, self.now, manipulation, self.network.warehouse_count);
        let record = TripRecord {
            camel,
            kind: c.kind,
            generated_at: c.generated_at,
            request,
            warehouse: home,
            oasis: self.requests.get(request)?.oasis,
            plan,
        };

        let plan = &record.plan;
        for step in plan.outbound.iter().chain(plan.inbound.iter()) {
            match *step {
                TripStep::Drink { node, at } => {
                    self.queue.schedule(at, Event::CamelDrink { camel, node });
                }
                TripStep::Arrive { node, at, notable } => {
                    self.queue.schedule(at, Event::CamelWalk { camel, node, notable });
                }
            }
        }
        self.queue.schedule(plan.delivers_at, Event::CamelDeliver { camel, request });
        self.queue.schedule(plan.returns_at, Event::CamelReturn { camel, request });

        debug!(
            %camel,
            %request,
            load = plan.load,
            departs = %plan.departs_at,
            delivers = %plan.delivers_at,
            returns = %plan.returns_at,
            "camel departs"
        );
        observer.on_trip(&record);
        Ok(())
    }

    fn on_deliver(&mut self, camel: CamelId, id: RequestId) -> SimResult<()> {
        let request = self.requests.get_mut(id)?;
        let c = self.fleet.camel_mut(camel)?;
        let load = c.load;
        c.load = 0;
        c.location = self.network.oasis_node(request.oasis);
        request.deliver(load);
        self.baskets_delivered += load as u64;
        debug!(%camel, request = %id, load, delivered = request.delivered, "baskets delivered");

        if request.is_fully_delivered() && request.state != RequestState::Cancelled {
            self.queue.schedule(self.now, Event::RequestFulfilled { request: id });
        }
        Ok(())
    }

    fn on_fulfilled<O: SimObserver>(&mut self, id: RequestId, observer: &mut O) -> SimResult<()> {
        let request = self.requests.get_mut(id)?;
        if let Some(fail) = request.fail_event.take() {
            self.queue.cancel(fail)?;
        }
        request.delivered_at = Some(self.now);
        request.state = if request.en_route().is_empty() {
            RequestState::Completed
        } else {
            RequestState::Delivered
        };
        self.requests_fulfilled += 1;
        info!(request = %id, time = %self.now, "request fulfilled");
        observer.on_request_state(self.now, request);

        if request.state == RequestState::Completed {
            self.test_end();
        }
        Ok(())
    }

    fn on_return<O: SimObserver>(
        &mut self,
        camel: CamelId,
        id: RequestId,
        observer: &mut O,
    ) -> SimResult<()> {
        let c = self.fleet.camel_mut(camel)?;
        let home = c.home;
        c.location = home.node();
        self.warehouses[home.index()].return_camel(camel)?;

        let request = self.requests.get_mut(id)?;
        request.release(camel)?;
        debug!(%camel, request = %id, warehouse = %home, "camel returned");
        if request.en_route().is_empty() && request.state == RequestState::Delivered {
            request.state = RequestState::Completed;
            observer.on_request_state(self.now, request);
        }
        self.test_end();
        Ok(())
    }

    fn on_refill<O: SimObserver>(&mut self, w: WarehouseId, observer: &mut O) -> SimResult<()> {
        let warehouse = &mut self.warehouses[w.index()];
        let before = warehouse.refill();
        let record = RefillRecord { warehouse: w, time: self.now, before, after: warehouse.baskets };
        self.queue.schedule(
            self.now.offset(warehouse.refill_interval),
            Event::BasketRefill { warehouse: w },
        );
        debug!(warehouse = %w, before, after = record.after, "warehouse refilled");
        observer.on_refill(&record);
        self.retry_parked(w)
    }

    fn on_end<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimSummary> {
        self.end_event = None;
        if let Some(open) = self.requests.first_open() {
            return Err(InvariantViolation::RequestNotTerminal { request: open.id, state: open.state }.into());
        }
        self.status = Status::Finished;
        let summary = self.summary();
        info!(%summary, "simulation finished");
        observer.on_sim_end(&summary, &self.requests);
        Ok(summary)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Schedule the end event once every request is settled.
    pub(crate) fn test_end(&mut self) {
        if self.end_event.is_none() && self.requests.all_settled() {
            self.end_event = Some(self.queue.schedule(self.now, Event::SimulationEnd));
        }
    }

    /// Drop a queued event outside event processing.  A missing event halts
    /// the run like any other invariant violation.
    fn cancel_event(&mut self, id: EventId) -> SimResult<()> {
        match self.queue.cancel(id) {
            Ok(_) => Ok(()),
            Err(violation) => {
                warn!(error = %violation, time = %self.now, "simulation halted");
                self.status = Status::Halted;
                Err(violation.into())
            }
        }
    }

    fn ensure_running(&self) -> SimResult<()> {
        match self.status {
            Status::Running => Ok(()),
            Status::Finished => Err(SimError::Config("simulation already finished".into())),
            Status::Halted => Err(SimError::Halted),
        }
    }

    /// Node the camel was last seen at.
    pub fn camel_location(&self, camel: CamelId) -> SimResult<NodeId> {
        Ok(self.fleet.camel(camel)?.location)
    }
}
