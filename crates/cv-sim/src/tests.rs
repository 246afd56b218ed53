//! Unit and scenario tests for cv-sim.

#[cfg(test)]
mod helpers {
    use cv_core::{NodeId, OasisId, Point, SimConfig};
    use cv_fleet::CamelType;

    use crate::{RequestSpec, SimBuilder, WarehouseSpec};

    /// Speed 1, range 100, drink 1, carries 2.  Sampling is exact.
    pub fn plodder() -> CamelType {
        CamelType {
            name: "plodder".into(),
            min_speed: 1.0,
            max_speed: 1.0,
            min_range: 100.0,
            max_range: 100.0,
            drink_time: 1.0,
            max_load: 2,
            share: 1.0,
        }
    }

    pub fn depot(x: f64, y: f64, stock: u32, interval: f64) -> WarehouseSpec {
        WarehouseSpec {
            position: Point::new(x, y),
            refill_count: stock,
            refill_interval: interval,
            manipulation_time: 0.0,
        }
    }

    pub fn request(arrival: f64, oasis: u32, baskets: u32, deadline: f64) -> RequestSpec {
        RequestSpec { arrival, oasis: OasisId(oasis), baskets, deadline }
    }

    /// Warehouse 0 at the origin with oases at distance 10 in three
    /// directions, each linked only to the warehouse.
    pub fn star() -> SimBuilder {
        SimBuilder::new(SimConfig::with_seed(1))
            .warehouse(depot(0.0, 0.0, 10, 1000.0))
            .oasis(Point::new(10.0, 0.0))
            .oasis(Point::new(0.0, 10.0))
            .oasis(Point::new(-10.0, 0.0))
            .edge(NodeId(0), NodeId(1))
            .edge(NodeId(0), NodeId(2))
            .edge(NodeId(0), NodeId(3))
            .camel_type(plodder())
    }

    /// Warehouse 0 at the origin, oasis 0 at x = 10.
    pub fn line(stock: u32, interval: f64) -> SimBuilder {
        SimBuilder::new(SimConfig::with_seed(1))
            .warehouse(depot(0.0, 0.0, stock, interval))
            .oasis(Point::new(10.0, 0.0))
            .edge(NodeId(0), NodeId(1))
            .camel_type(plodder())
    }
}

// ── Event queue ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue {
    use cv_core::{RequestId, SimTime, WarehouseId};

    use crate::{Event, EventQueue, InvariantViolation};

    #[test]
    fn time_then_priority_then_fifo() {
        let mut q = EventQueue::new();
        q.schedule(SimTime(2.0), Event::Pause);
        q.schedule(SimTime(1.0), Event::RequestReceive { request: RequestId(0) });
        q.schedule(SimTime(1.0), Event::BasketRefill { warehouse: WarehouseId(0) });
        q.schedule(SimTime(1.0), Event::RequestReceive { request: RequestId(1) });
        q.schedule(SimTime(1.0), Event::SimulationEnd);

        let order: Vec<Event> = std::iter::from_fn(|| q.pop().map(|(_, _, e)| e)).collect();
        assert_eq!(
            order,
            vec![
                Event::BasketRefill { warehouse: WarehouseId(0) },
                Event::RequestReceive { request: RequestId(0) },
                Event::RequestReceive { request: RequestId(1) },
                Event::SimulationEnd,
                Event::Pause,
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_removes_exactly_once() {
        let mut q = EventQueue::new();
        let a = q.schedule(SimTime(1.0), Event::Pause);
        let b = q.schedule(SimTime(2.0), Event::SimulationEnd);
        assert_eq!(q.cancel(a), Ok(Event::Pause));
        assert_eq!(q.cancel(a), Err(InvariantViolation::EventNotQueued(a)));
        assert_eq!(q.len(), 1);
        assert_eq!(q.peek_time(), Some(SimTime(2.0)));

        let (id, _, _) = q.pop().unwrap();
        assert_eq!(id, b);
        assert!(!q.contains(b));
        assert!(q.cancel(b).is_err());
    }
}

// ── Requests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod requests {
    use cv_core::{CamelId, OasisId, RequestId, SimTime};

    use crate::{InvariantViolation, RequestManager, RequestState, SimError};

    #[test]
    fn retry_order_is_smallest_time_left_first() {
        let mut m = RequestManager::new();
        let a = m.add(OasisId(0), 1, SimTime(1.0), 60.0);
        let b = m.add(OasisId(0), 1, SimTime(3.0), 59.0);
        let c = m.add(OasisId(0), 1, SimTime(6.0), 62.0);
        for id in [a, b, c] {
            m.park(id).unwrap();
        }
        // a is due first in absolute terms, but b and c have less time left;
        // between those two the earlier arrival wins.
        assert_eq!(m.parked(), vec![b, c, a]);

        assert!(m.unpark(c).unwrap());
        assert!(!m.unpark(c).unwrap());
        assert!(!m.is_parked(c));
        assert_eq!(m.parked_count(), 2);
    }

    #[test]
    fn accounting_holds_through_assign_and_deliver() {
        let mut m = RequestManager::new();
        let id = m.add(OasisId(0), 5, SimTime::ZERO, 10.0);
        let r = m.get_mut(id).unwrap();
        r.assign(CamelId(0), 2);
        r.assign(CamelId(1), 2);
        assert!(r.is_accounted());
        assert!(r.has_assignments());
        r.deliver(2);
        assert_eq!((r.delivered, r.remaining, r.in_flight), (2, 1, 2));
        assert!(r.is_accounted());

        r.release(CamelId(0)).unwrap();
        assert_eq!(r.en_route(), &[CamelId(1)]);
        assert_eq!(r.serving().count(), 2);
        assert_eq!(
            r.release(CamelId(0)),
            Err(InvariantViolation::CamelNotEnRoute { camel: CamelId(0), request: id })
        );
    }

    #[test]
    fn terminal_and_cancellable_states() {
        assert!(RequestState::Completed.is_terminal());
        assert!(RequestState::Cancelled.is_terminal());
        assert!(!RequestState::Delivered.is_terminal());
        assert!(RequestState::Inactive.is_cancellable());
        assert!(RequestState::Unprocessed.is_cancellable());
        assert!(RequestState::Unfinished.is_cancellable());
        assert!(!RequestState::Active.is_cancellable());
        assert!(!RequestState::Delivered.is_cancellable());
    }

    #[test]
    fn unknown_request_is_an_error() {
        let m = RequestManager::new();
        assert!(matches!(m.get(RequestId(3)), Err(SimError::UnknownRequest(RequestId(3)))));
    }
}

// ── Warehouse allocation ──────────────────────────────────────────────────────

#[cfg(test)]
mod warehouse {
    use cv_core::{CamelId, NodeId, OasisId, Point, SimTime, WarehouseId};
    use cv_fleet::{Fleet, FleetBuilder};
    use cv_spatial::{NetworkBuilder, PathDescriptor};

    use crate::{InvariantViolation, Warehouse};
    use super::helpers::{depot, plodder};

    fn setup(stock: u32) -> (Warehouse, Fleet, PathDescriptor) {
        let mut b = NetworkBuilder::new();
        let w = b.add_warehouse(Point::new(0.0, 0.0)).unwrap();
        let o = b.add_oasis(Point::new(10.0, 0.0));
        b.add_edge(w, o).unwrap();
        let net = b.build();
        let path = PathDescriptor::from_nodes(&net, vec![w, o]);
        assert_eq!(net.oasis_node(OasisId(0)), NodeId(1));

        let fleet = Fleet::new(FleetBuilder::new(3).camel_type(plodder()).build().unwrap());
        (Warehouse::new(WarehouseId(0), &depot(0.0, 0.0, stock, 10.0)), fleet, path)
    }

    #[test]
    fn generates_camels_until_amount_is_covered() {
        let (mut w, mut fleet, path) = setup(10);
        let got = w.distribute(&mut fleet, 3, &path, 100.0, SimTime::ZERO).unwrap();
        let loads: Vec<u32> = got.iter().map(|c| c.load).collect();
        assert_eq!(loads, vec![2, 1]);
        assert_eq!(w.baskets, 7);
        assert_eq!(w.away().count(), 2);
        assert_eq!(fleet.camel(CamelId(1)).unwrap().load, 1);
        assert!(w.is_conserved());
    }

    #[test]
    fn idle_camels_go_first() {
        let (mut w, mut fleet, path) = setup(10);
        w.distribute(&mut fleet, 2, &path, 100.0, SimTime::ZERO).unwrap();
        w.return_camel(CamelId(0)).unwrap();

        let got = w.distribute(&mut fleet, 1, &path, 100.0, SimTime(30.0)).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].camel, CamelId(0));
        assert_eq!(fleet.len(), 1);
    }

    #[test]
    fn infeasible_new_camel_is_parked_idle() {
        let (mut w, mut fleet, path) = setup(10);
        let got = w.distribute(&mut fleet, 2, &path, 5.0, SimTime::ZERO).unwrap();
        assert!(got.is_empty());
        assert_eq!(w.baskets, 10);
        assert_eq!(w.idle().collect::<Vec<_>>(), vec![CamelId(0)]);
        assert_eq!(
            w.return_camel(CamelId(0)),
            Err(InvariantViolation::CamelNotAway { camel: CamelId(0), warehouse: WarehouseId(0) })
        );
    }

    #[test]
    fn deliverability_uses_ideal_camels() {
        let (w, fleet, path) = setup(1);
        assert!(w.is_deliverable(fleet.ideal_camels(), &path, 10.0));
        assert!(!w.is_deliverable(fleet.ideal_camels(), &path, 9.9));
        assert!(!w.is_deliverable(fleet.ideal_camels(), &PathDescriptor::unreachable(), 1e9));
    }

    #[test]
    fn missing_camel_estimate() {
        let (mut w, mut fleet, path) = setup(10);
        assert_eq!(w.missing_camel_count(&mut fleet, 5, &path, 100.0, SimTime::ZERO).unwrap(), Some(3));

        w.distribute(&mut fleet, 2, &path, 100.0, SimTime::ZERO).unwrap();
        w.return_camel(CamelId(0)).unwrap();
        assert_eq!(w.missing_camel_count(&mut fleet, 5, &path, 100.0, SimTime::ZERO).unwrap(), Some(2));
        assert_eq!(fleet.len(), 1, "probes are never stored");
    }

    #[test]
    fn idle_camels_that_cannot_make_it_do_not_count() {
        let (mut w, mut fleet, path) = setup(10);
        w.distribute(&mut fleet, 2, &path, 100.0, SimTime::ZERO).unwrap();
        w.return_camel(CamelId(0)).unwrap();
        assert_eq!(w.idle().count(), 1);

        // Ten units of walking never fit in a slack of one.
        assert_eq!(w.missing_camel_count(&mut fleet, 1, &path, 1.0, SimTime::ZERO).unwrap(), None);
        assert_eq!(w.missing_camel_count(&mut fleet, 2, &path, 10.0, SimTime::ZERO).unwrap(), Some(0));
    }

    #[test]
    fn refill_reports_previous_count() {
        let (mut w, _, _) = setup(4);
        assert_eq!(w.refill(), 4);
        assert_eq!(w.baskets, 8);
        assert_eq!(w.total_stocked, 8);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use cv_core::{NodeId, SimConfig, SimTime};
    use cv_fleet::FleetError;
    use cv_spatial::StrategyKind;

    use crate::{SimBuilder, SimError};
    use super::helpers::{depot, line, request, star};

    #[test]
    fn star_selects_centre_strategy() {
        let sim = star().build().unwrap();
        assert_eq!(sim.dispatcher().strategy().kind(), StrategyKind::Centre);
        assert_eq!(sim.now(), SimTime::ZERO);
    }

    #[test]
    fn forced_strategy_is_used() {
        let sim = star().strategy(StrategyKind::AStar).build().unwrap();
        assert_eq!(sim.dispatcher().strategy().kind(), StrategyKind::AStar);
        assert!(matches!(
            line(1, 10.0).oasis(cv_core::Point::new(0.0, 5.0)).strategy(StrategyKind::Centre).build(),
            Err(SimError::Spatial(_))
        ));
    }

    #[test]
    fn missing_camel_types_rejected() {
        let r = SimBuilder::new(SimConfig::default()).warehouse(depot(0.0, 0.0, 1, 1.0)).build();
        assert!(matches!(r, Err(SimError::Fleet(FleetError::NoCamelTypes))));
    }

    #[test]
    fn bad_edges_rejected() {
        assert!(matches!(line(1, 10.0).edge(NodeId(0), NodeId(7)).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn bad_requests_rejected() {
        let unknown_oasis = line(1, 10.0).request(request(0.0, 3, 1, 10.0)).build();
        assert!(matches!(unknown_oasis, Err(SimError::Config(_))));
        let no_baskets = line(1, 10.0).request(request(0.0, 0, 0, 10.0)).build();
        assert!(matches!(no_baskets, Err(SimError::Config(_))));
        let negative = line(1, 10.0).request(request(-1.0, 0, 1, 10.0)).build();
        assert!(matches!(negative, Err(SimError::Config(_))));
        let bad_deadline = line(1, 10.0).request(request(0.0, 0, 1, -2.0)).build();
        assert!(matches!(bad_deadline, Err(SimError::Config(_))));
    }

    #[test]
    fn bad_warehouses_rejected() {
        let r = SimBuilder::new(SimConfig::default())
            .warehouse(depot(0.0, 0.0, 1, 0.0))
            .camel_type(super::helpers::plodder())
            .build();
        assert!(matches!(r, Err(SimError::Config(_))));
    }

    #[test]
    fn edges_beyond_every_range_are_dropped() {
        let sim = line(1, 10.0)
            .oasis(cv_core::Point::new(500.0, 0.0))
            .edge(NodeId(1), NodeId(2))
            .build()
            .unwrap();
        assert_eq!(sim.network.undirected_edge_count(), 1);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use std::sync::{Arc, Mutex};

    use cv_core::{CamelId, NodeId, RequestId, SimTime};

    use crate::{
        Event, InvariantViolation, NoopObserver, RefillRecord, RequestState, RunOutcome, SimError,
        SimObserver, TripRecord,
    };
    use super::helpers::{line, request, star};

    #[derive(Default)]
    struct Recorder {
        events: Vec<(SimTime, &'static str)>,
        trips: Vec<TripRecord>,
        refills: Vec<RefillRecord>,
    }

    impl SimObserver for Recorder {
        fn on_event(&mut self, time: SimTime, event: &Event) {
            self.events.push((time, event.name()));
        }
        fn on_trip(&mut self, trip: &TripRecord) {
            self.trips.push(trip.clone());
        }
        fn on_refill(&mut self, refill: &RefillRecord) {
            self.refills.push(*refill);
        }
    }

    #[test]
    fn star_delivery_completes() {
        let mut sim = star().request(request(0.0, 0, 2, 100.0)).build().unwrap();
        let mut rec = Recorder::default();
        let RunOutcome::Finished(summary) = sim.run(&mut rec).unwrap() else {
            panic!("run did not finish");
        };

        assert_eq!(summary.time, SimTime(20.0));
        assert_eq!((summary.baskets_delivered, summary.baskets_requested), (2, 2));
        assert_eq!((summary.requests_fulfilled, summary.requests_total), (1, 1));
        assert_eq!(summary.camels_used, 1);

        let r = sim.requests.get(RequestId(0)).unwrap();
        assert_eq!(r.state, RequestState::Completed);
        assert_eq!(r.delivered_at, Some(SimTime(10.0)));
        assert_eq!(sim.serving_camels(RequestId(0)).unwrap(), vec![CamelId(0)]);
        assert_eq!(sim.camel_location(CamelId(0)).unwrap(), NodeId(0));

        let trip = &rec.trips[0];
        assert_eq!(trip.plan.path, vec![NodeId(0), NodeId(1)]);
        assert_eq!((trip.plan.delivers_at, trip.plan.returns_at), (SimTime(10.0), SimTime(20.0)));
        assert!(sim.is_finished());
    }

    #[test]
    fn same_time_events_follow_priority() {
        let mut sim = star().request(request(0.0, 0, 2, 100.0)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        let names: Vec<&str> = rec.events.iter().map(|&(_, n)| n).collect();
        assert_eq!(
            names,
            vec![
                "request-receive",
                "camel-prepare",
                "camel-deliver",
                "request-fulfilled",
                "camel-walk",
                "camel-return",
                "camel-walk",
                "simulation-end",
            ]
        );
        assert!(rec.events.windows(2).all(|w| w[0].0 <= w[1].0), "clock went backwards");
    }

    #[test]
    fn deadline_breach_halts_the_run() {
        let mut sim = line(5, 100.0).request(request(0.0, 0, 1, 5.0)).build().unwrap();
        let err = sim.run(&mut NoopObserver).unwrap_err();
        assert!(matches!(
            err,
            SimError::DeadlineBreach { request: RequestId(0), time } if time == SimTime(5.0)
        ));
        assert!(err.is_fatal());
        assert!(sim.is_halted());
        assert!(matches!(sim.advance(&mut NoopObserver), Err(SimError::Halted)));
        assert_eq!(sim.fleet.len(), 0, "no camel could make it, none was generated");
    }

    #[test]
    fn partial_delivery_then_retry_on_refill() {
        let mut sim = line(2, 5.0).request(request(0.0, 0, 5, 100.0)).build().unwrap();
        let mut rec = Recorder::default();

        sim.run_until(SimTime(1.0), &mut rec).unwrap();
        let r = sim.requests.get(RequestId(0)).unwrap();
        assert_eq!(r.state, RequestState::Unfinished);
        assert_eq!((r.remaining, r.in_flight), (3, 2));
        assert!(sim.requests.is_parked(RequestId(0)));

        sim.run_until(SimTime(7.0), &mut rec).unwrap();
        let r = sim.requests.get(RequestId(0)).unwrap();
        assert_eq!(r.state, RequestState::Unfinished);
        assert_eq!((r.remaining, r.in_flight), (1, 4));
        assert!(r.is_accounted());

        let RunOutcome::Finished(summary) = sim.run(&mut rec).unwrap() else {
            panic!("run did not finish");
        };
        assert_eq!(summary.time, SimTime(30.0));
        assert_eq!(summary.camels_used, 3);
        assert_eq!(summary.baskets_delivered, 5);

        let r = sim.requests.get(RequestId(0)).unwrap();
        assert_eq!(r.state, RequestState::Completed);
        assert_eq!(r.delivered_at, Some(SimTime(20.0)));
        assert!(!sim.requests.is_parked(RequestId(0)));

        let loads: Vec<u32> = rec.trips.iter().map(|t| t.plan.load).collect();
        assert_eq!(loads, vec![2, 2, 1]);
        assert_eq!(rec.refills[0], RefillRecord {
            warehouse: cv_core::WarehouseId(0),
            time: SimTime(5.0),
            before: 0,
            after: 2,
        });

        let w = &sim.warehouses[0];
        assert!(w.is_conserved());
        assert_eq!(w.total_dispatched, 5);
        assert_eq!(w.baskets, 9);
        assert_eq!(w.idle().count(), 3);
    }

    #[test]
    fn unreachable_oasis_waits_and_can_be_cancelled() {
        let mut sim = line(5, 10.0)
            .oasis(cv_core::Point::new(50.0, 50.0))
            .request(request(0.0, 1, 1, 1000.0))
            .build()
            .unwrap();

        sim.run_until(SimTime(100.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.request_state(RequestId(0)).unwrap(), RequestState::Unprocessed);
        assert_eq!(sim.fleet.len(), 0);

        sim.cancel(RequestId(0)).unwrap();
        let RunOutcome::Finished(summary) = sim.run(&mut NoopObserver).unwrap() else {
            panic!("run did not finish");
        };
        assert_eq!(summary.requests_cancelled, 1);
        assert_eq!(summary.time, SimTime(100.0));
    }

    #[test]
    fn cancel_rules() {
        let mut sim = line(5, 10.0)
            .request(request(0.0, 0, 1, 100.0))
            .request(request(50.0, 0, 1, 100.0))
            .build()
            .unwrap();
        sim.run_until(SimTime(1.0), &mut NoopObserver).unwrap();
        assert!(matches!(
            sim.cancel(RequestId(0)),
            Err(SimError::NotCancellable { state: RequestState::Active, .. })
        ));

        sim.cancel(RequestId(1)).unwrap();
        assert_eq!(sim.request_state(RequestId(1)).unwrap(), RequestState::Cancelled);
        assert!(sim.run(&mut NoopObserver).is_ok());
        assert!(sim.is_finished());
    }

    #[test]
    fn refill_goes_to_the_request_with_least_time_left() {
        let mut sim = line(1, 10.0)
            .request(request(0.0, 0, 1, 100.0))
            .request(request(1.0, 0, 1, 60.0))
            .request(request(3.0, 0, 1, 59.0))
            .build()
            .unwrap();
        let (first, second) = (RequestId(1), RequestId(2));

        sim.run_until(SimTime(5.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.request_state(first).unwrap(), RequestState::Unprocessed);
        assert_eq!(sim.request_state(second).unwrap(), RequestState::Unprocessed);
        assert_eq!(sim.requests.parked(), vec![second, first]);

        // One basket arrives at t = 10; the later request has less time left.
        sim.run_until(SimTime(11.0), &mut NoopObserver).unwrap();
        assert_eq!(sim.request_state(second).unwrap(), RequestState::Active);
        assert_eq!(sim.request_state(first).unwrap(), RequestState::Unprocessed);
        assert_eq!(sim.serving_camels(second).unwrap(), vec![CamelId(1)]);
        assert_eq!(sim.requests.parked(), vec![first]);

        let RunOutcome::Finished(summary) = sim.run(&mut NoopObserver).unwrap() else {
            panic!("run did not finish");
        };
        assert_eq!(summary.time, SimTime(40.0));
        assert_eq!(sim.requests.get(second).unwrap().delivered_at, Some(SimTime(20.0)));
        assert_eq!(sim.requests.get(first).unwrap().delivered_at, Some(SimTime(30.0)));
    }

    #[test]
    fn unfinished_request_can_be_cancelled_while_camels_walk() {
        let mut sim = line(2, 5.0).request(request(0.0, 0, 5, 100.0)).build().unwrap();
        let mut rec = Recorder::default();

        sim.run_until(SimTime(1.0), &mut rec).unwrap();
        assert_eq!(sim.request_state(RequestId(0)).unwrap(), RequestState::Unfinished);
        sim.cancel(RequestId(0)).unwrap();
        assert_eq!(sim.request_state(RequestId(0)).unwrap(), RequestState::Cancelled);
        assert!(!sim.requests.is_parked(RequestId(0)));

        // The camel already on its way still has to come home first.
        sim.run_until(SimTime(15.0), &mut rec).unwrap();
        assert!(!sim.is_finished());

        let RunOutcome::Finished(summary) = sim.run(&mut rec).unwrap() else {
            panic!("run did not finish");
        };
        assert_eq!(summary.time, SimTime(20.0));
        assert_eq!(summary.baskets_delivered, 2);
        assert_eq!((summary.requests_fulfilled, summary.requests_cancelled), (0, 1));
        assert_eq!(rec.trips.len(), 1, "refills never serve a cancelled request");

        let r = sim.requests.get(RequestId(0)).unwrap();
        assert_eq!(r.state, RequestState::Cancelled);
        assert_eq!(r.delivered, 2);
        assert_eq!(r.delivered_at, None);
        assert!(r.en_route().is_empty());
        assert!(rec.events.iter().all(|&(_, name)| name != "request-fulfilled"));
        assert!(sim.warehouses[0].is_conserved());
    }

    #[test]
    fn violation_during_cancel_halts() {
        let mut sim = line(5, 10.0).request(request(50.0, 0, 1, 100.0)).build().unwrap();
        let receive = sim.requests.get(RequestId(0)).unwrap().receive_event.unwrap();
        sim.queue.cancel(receive).unwrap();

        let err = sim.cancel(RequestId(0)).unwrap_err();
        assert!(matches!(err, SimError::Invariant(InvariantViolation::EventNotQueued(_))));
        assert!(sim.is_halted());
        assert!(matches!(sim.advance(&mut NoopObserver), Err(SimError::Halted)));
    }

    #[test]
    fn empty_scenario_finishes_immediately() {
        let mut sim = line(5, 10.0).build().unwrap();
        let RunOutcome::Finished(summary) = sim.run(&mut NoopObserver).unwrap() else {
            panic!("run did not finish");
        };
        assert_eq!(summary.time, SimTime::ZERO);
        assert_eq!(summary.requests_total, 0);
    }

    #[test]
    fn submit_and_pause() {
        let mut sim = line(5, 10.0).build().unwrap();
        let id = sim.submit(cv_core::OasisId(0), 1, SimTime(3.0), 50.0).unwrap();
        sim.pause_at(SimTime(4.0)).unwrap();

        assert_eq!(sim.run(&mut NoopObserver).unwrap(), RunOutcome::Paused(SimTime(4.0)));
        assert_eq!(sim.request_state(id).unwrap(), RequestState::Active);
        assert!(matches!(
            sim.submit(cv_core::OasisId(0), 1, SimTime(1.0), 50.0),
            Err(SimError::InThePast { .. })
        ));

        assert!(matches!(sim.run(&mut NoopObserver).unwrap(), RunOutcome::Finished(_)));
        assert!(matches!(
            sim.submit(cv_core::OasisId(0), 1, SimTime(100.0), 50.0),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn shared_observer_sees_refills() {
        struct Shared(Arc<Mutex<Vec<SimTime>>>);
        impl SimObserver for Shared {
            fn on_refill(&mut self, refill: &RefillRecord) {
                self.0.lock().unwrap().push(refill.time);
            }
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut sim = line(1, 10.0).request(request(0.0, 0, 1, 100.0)).build().unwrap();
        sim.run_until(SimTime(35.0), &mut Shared(Arc::clone(&seen))).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![SimTime(10.0), SimTime(20.0)]);
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loading {
    use std::io::Cursor;

    use cv_core::OasisId;
    use cv_spatial::StrategyKind;

    use crate::{load_requests_reader, RunOutcome, NoopObserver, Scenario, SimError};

    #[test]
    fn csv_oasis_index_is_one_based() {
        let csv = "arrival,oasis,baskets,deadline\n0.0, 1, 3, 40.0\n12.5,2,1,30\n";
        let specs = load_requests_reader(Cursor::new(csv)).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].oasis, OasisId(0));
        assert_eq!(specs[1].oasis, OasisId(1));
        assert_eq!(specs[1].arrival, 12.5);

        let zero = "arrival,oasis,baskets,deadline\n0,0,1,1\n";
        assert!(matches!(load_requests_reader(Cursor::new(zero)), Err(SimError::Parse(_))));
    }

    #[test]
    fn json_scenario_runs() {
        let json = r#"{
            "config": { "seed": 9 },
            "warehouses": [
                { "position": { "x": 0.0, "y": 0.0 }, "refill_count": 4,
                  "refill_interval": 50.0, "manipulation_time": 0.5 }
            ],
            "oases": [ { "x": 6.0, "y": 8.0 } ],
            "edges": [ [0, 1] ],
            "camel_types": [
                { "name": "dromedary", "min_speed": 1.0, "max_speed": 2.0,
                  "min_range": 20.0, "max_range": 30.0, "drink_time": 1.0,
                  "max_load": 2, "share": 1.0 }
            ],
            "requests": [ { "arrival": 1.0, "oasis": 0, "baskets": 3, "deadline": 40.0 } ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.config.seed, 9);
        assert_eq!(scenario.config.max_warehouses_per_pass, 10);

        let mut sim = scenario.into_builder().build().unwrap();
        let RunOutcome::Finished(summary) = sim.run(&mut NoopObserver).unwrap() else {
            panic!("run did not finish");
        };
        assert_eq!(summary.baskets_delivered, 3);
    }

    #[test]
    fn json_scenario_can_force_a_strategy() {
        let json = r#"{
            "warehouses": [
                { "position": { "x": 0.0, "y": 0.0 }, "refill_count": 1,
                  "refill_interval": 10.0, "manipulation_time": 0.0 }
            ],
            "oases": [ { "x": 3.0, "y": 4.0 }, { "x": -3.0, "y": 4.0 } ],
            "edges": [ [0, 1], [0, 2] ],
            "camel_types": [
                { "name": "plodder", "min_speed": 1.0, "max_speed": 1.0,
                  "min_range": 50.0, "max_range": 50.0, "drink_time": 1.0,
                  "max_load": 1, "share": 1.0 }
            ],
            "strategy": "AStar"
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.strategy, Some(StrategyKind::AStar));

        let sim = scenario.into_builder().build().unwrap();
        assert_eq!(sim.dispatcher().strategy().kind(), StrategyKind::AStar);

        let unforced = Scenario { strategy: None, ..serde_json::from_str::<Scenario>(json).unwrap() };
        let sim = unforced.into_builder().build().unwrap();
        assert_eq!(sim.dispatcher().strategy().kind(), StrategyKind::Centre);
    }
}
