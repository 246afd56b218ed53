//! Unit tests for cv-fleet.

#[cfg(test)]
mod helpers {
    use cv_core::{CamelId, CamelTypeId, NodeId, Point, SimTime, WarehouseId};
    use cv_spatial::{Network, NetworkBuilder, PathDescriptor};

    use crate::{Camel, CamelType};

    /// Warehouse 0 at the origin, oases at x = 6 and x = 12 on a line.
    pub fn line() -> Network {
        let mut b = NetworkBuilder::new();
        let w = b.add_warehouse(Point::new(0.0, 0.0)).unwrap();
        let o1 = b.add_oasis(Point::new(6.0, 0.0));
        let o2 = b.add_oasis(Point::new(12.0, 0.0));
        b.add_edge(w, o1).unwrap();
        b.add_edge(o1, o2).unwrap();
        b.build()
    }

    /// Path W0 → O1 → O2 with hops of 6 and 6.
    pub fn line_path(net: &Network) -> PathDescriptor {
        PathDescriptor::from_nodes(net, vec![NodeId(0), NodeId(1), NodeId(2)])
    }

    /// Speed 2, range 10, drink time 1, capacity 3.
    pub fn camel(range: f64) -> Camel {
        Camel {
            id: CamelId(0),
            kind: CamelTypeId(0),
            generated_at: SimTime::ZERO,
            speed: 2.0,
            range,
            drink_time: 1.0,
            max_load: 3,
            load: 0,
            location: NodeId(0),
            home: WarehouseId(0),
        }
    }

    pub fn fixed_type(name: &str, share: f64) -> CamelType {
        CamelType {
            name: name.into(),
            min_speed: 2.0,
            max_speed: 2.0,
            min_range: 10.0,
            max_range: 10.0,
            drink_time: 1.0,
            max_load: 3,
            share,
        }
    }

    pub fn varied_type(share: f64) -> CamelType {
        CamelType {
            name: "varied".into(),
            min_speed: 1.0,
            max_speed: 5.0,
            min_range: 20.0,
            max_range: 60.0,
            drink_time: 2.0,
            max_load: 4,
            share,
        }
    }
}

// ── Feasibility ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod feasibility {
    use cv_spatial::PathDescriptor;
    use super::helpers::{camel, line, line_path};

    // Load 1, manipulation 0.5: 1.0 handling + 3 walk + 1 drink + 3 walk = 8.

    #[test]
    fn exact_slack_is_enough() {
        let net = line();
        let path = line_path(&net);
        assert!(camel(10.0).can_deliver_in_time(&path, 1, 0.5, 8.0));
        assert!(!camel(10.0).can_deliver_in_time(&path, 1, 0.5, 7.9));
    }

    #[test]
    fn duration_matches_check() {
        let net = line();
        let path = line_path(&net);
        assert_eq!(camel(10.0).delivery_duration(&path, 1, 0.5), Some(8.0));
        assert_eq!(camel(10.0).delivery_duration(&path, 3, 0.5), Some(10.0));
    }

    #[test]
    fn lighter_loads_stay_feasible() {
        let net = line();
        let path = line_path(&net);
        let c = camel(10.0);
        // Load 2 → 9, load 3 → 10.
        assert!(c.can_deliver_in_time(&path, 1, 0.5, 9.0));
        assert!(c.can_deliver_in_time(&path, 2, 0.5, 9.0));
        assert!(!c.can_deliver_in_time(&path, 3, 0.5, 9.0));
        for slack in [7.0, 8.0, 9.0, 10.0, 11.0] {
            for load in 2..=3 {
                if c.can_deliver_in_time(&path, load, 0.5, slack) {
                    assert!(c.can_deliver_in_time(&path, load - 1, 0.5, slack));
                }
            }
        }
    }

    #[test]
    fn hop_longer_than_range_is_never_feasible() {
        let net = line();
        let path = line_path(&net);
        let c = camel(5.0);
        assert!(!c.can_deliver_in_time(&path, 1, 0.0, 1e9));
        assert_eq!(c.delivery_duration(&path, 1, 0.0), None);
    }

    #[test]
    fn unreachable_path_is_infeasible() {
        let c = camel(10.0);
        assert!(!c.can_deliver_in_time(&PathDescriptor::unreachable(), 1, 0.0, 1e9));
    }

    #[test]
    fn negative_slack_fails_immediately() {
        let net = line();
        let path = line_path(&net);
        assert!(!camel(100.0).can_deliver_in_time(&path, 1, 0.0, -1.0));
    }
}

// ── Trip plans ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trip_plan {
    use cv_core::{NodeId, SimTime};
    use crate::TripStep;
    use super::helpers::{camel, line, line_path};

    #[test]
    fn timings_and_drinks() {
        let net = line();
        let path = line_path(&net);
        let mut c = camel(10.0);
        c.load = 2;
        let plan = c.plan_trip(&path, SimTime(10.0), 0.5, net.warehouse_count);

        assert_eq!(plan.load, 2);
        assert_eq!(plan.departs_at, SimTime(11.0));
        assert_eq!(
            plan.outbound,
            vec![
                TripStep::Arrive { node: NodeId(1), at: SimTime(14.0), notable: false },
                TripStep::Drink  { node: NodeId(1), at: SimTime(14.0) },
                TripStep::Arrive { node: NodeId(2), at: SimTime(18.0), notable: false },
            ]
        );
        assert_eq!(plan.delivers_at, SimTime(18.0));
        // Range is not reset at the oasis: 4 left, next hop is 6.
        assert_eq!(
            plan.inbound,
            vec![
                TripStep::Drink  { node: NodeId(2), at: SimTime(19.0) },
                TripStep::Arrive { node: NodeId(1), at: SimTime(23.0), notable: false },
                TripStep::Drink  { node: NodeId(1), at: SimTime(23.0) },
                TripStep::Arrive { node: NodeId(0), at: SimTime(27.0), notable: false },
            ]
        );
        assert_eq!(plan.returns_at, SimTime(27.0));
        assert_eq!(plan.walked, 24.0);
        let drinks: Vec<_> = plan.drinks().collect();
        assert_eq!(
            drinks,
            vec![(SimTime(14.0), NodeId(1)), (SimTime(19.0), NodeId(2)), (SimTime(23.0), NodeId(1))]
        );
    }

    #[test]
    fn intermediate_oasis_is_notable_without_drinks() {
        let net = line();
        let path = line_path(&net);
        let mut c = camel(100.0);
        c.load = 1;
        let plan = c.plan_trip(&path, SimTime::ZERO, 0.0, net.warehouse_count);
        assert!(matches!(plan.outbound[0], TripStep::Arrive { node: NodeId(1), notable: true, .. }));
        assert!(matches!(plan.outbound[1], TripStep::Arrive { node: NodeId(2), notable: false, .. }));
        assert!(matches!(plan.inbound[0], TripStep::Arrive { node: NodeId(1), notable: true, .. }));
        assert!(matches!(plan.inbound[1], TripStep::Arrive { node: NodeId(0), notable: false, .. }));
        assert_eq!(plan.drinks().count(), 0);
    }

    #[test]
    fn only_the_final_arrival_of_a_long_leg_is_quiet() {
        use cv_core::Point;
        use cv_spatial::{NetworkBuilder, PathDescriptor};

        let mut b = NetworkBuilder::new();
        let w = b.add_warehouse(Point::new(0.0, 0.0)).unwrap();
        let oases: Vec<NodeId> = (1..=4).map(|k| b.add_oasis(Point::new(3.0 * k as f64, 0.0))).collect();
        b.add_edge(w, oases[0]).unwrap();
        for pair in oases.windows(2) {
            b.add_edge(pair[0], pair[1]).unwrap();
        }
        let net = b.build();
        let mut nodes = vec![w];
        nodes.extend(&oases);
        let path = PathDescriptor::from_nodes(&net, nodes);

        let plan = camel(100.0).plan_trip(&path, SimTime::ZERO, 0.0, net.warehouse_count);
        let notable: Vec<bool> = plan
            .outbound
            .iter()
            .map(|s| matches!(s, TripStep::Arrive { notable: true, .. }))
            .collect();
        assert_eq!(notable, vec![true, true, true, false]);
        assert_eq!(plan.delivers_at, SimTime(6.0));
    }

    #[test]
    fn plan_agrees_with_feasibility() {
        let net = line();
        let path = line_path(&net);
        let mut c = camel(10.0);
        c.load = 3;
        let now = SimTime(5.0);
        let plan = c.plan_trip(&path, now, 0.5, net.warehouse_count);
        let duration = c.delivery_duration(&path, 3, 0.5).unwrap();
        // Delivery leg ends after unloading.
        assert_eq!(plan.delivers_at.0 + 3.0 * 0.5, now.0 + duration);
    }
}

// ── Factory ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory {
    use cv_core::{CamelId, CamelTypeId, SimTime, WarehouseId};
    use crate::{CamelFactory, FleetBuilder, FleetError};
    use super::helpers::{fixed_type, varied_type};

    #[test]
    fn empty_type_table_rejected() {
        assert!(matches!(FleetBuilder::new(0).build(), Err(FleetError::NoCamelTypes)));
    }

    #[test]
    fn shares_must_sum_to_one() {
        let r = FleetBuilder::new(0)
            .camel_type(fixed_type("a", 0.5))
            .camel_type(fixed_type("b", 0.4))
            .build();
        assert!(matches!(r, Err(FleetError::SharesDoNotSumToOne(_))));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut t = fixed_type("bad", 1.0);
        t.min_speed = 3.0;
        assert!(matches!(
            FleetBuilder::new(0).camel_type(t).build(),
            Err(FleetError::InvalidCamelType { .. })
        ));
    }

    #[test]
    fn ids_are_sequential_and_probes_are_anonymous() {
        let mut f = FleetBuilder::new(1).camel_type(fixed_type("a", 1.0)).build().unwrap();
        let a = f.generate(SimTime(1.0), WarehouseId(0)).unwrap();
        let probe = f.generate_anonymous(SimTime(1.0), WarehouseId(0)).unwrap();
        let b = f.generate(SimTime(2.0), WarehouseId(0)).unwrap();
        assert_eq!(a.id, CamelId(0));
        assert_eq!(b.id, CamelId(1));
        assert!(probe.is_anonymous());
        assert_eq!(f.generated_count(), 2);
        assert_eq!(b.generated_at, SimTime(2.0));
    }

    #[test]
    fn degenerate_ranges_sample_exactly() {
        let mut f = FleetBuilder::new(3).camel_type(fixed_type("a", 1.0)).build().unwrap();
        let c = f.generate(SimTime::ZERO, WarehouseId(2)).unwrap();
        assert_eq!(c.speed, 2.0);
        assert_eq!(c.range, 10.0);
        assert_eq!(c.home, WarehouseId(2));
        assert_eq!(c.location, WarehouseId(2).node());
    }

    #[test]
    fn samples_stay_in_bounds() {
        let mut f = FleetBuilder::new(9).camel_type(varied_type(1.0)).build().unwrap();
        for _ in 0..500 {
            let c = f.generate(SimTime::ZERO, WarehouseId(0)).unwrap();
            assert!((1.0..=5.0).contains(&c.speed));
            assert!(c.range > 0.0);
            assert_eq!(c.max_load, 4);
        }
    }

    #[test]
    fn range_is_centred_but_not_clamped_to_bounds() {
        let mut f = FleetBuilder::new(11).camel_type(varied_type(1.0)).build().unwrap();
        let ranges: Vec<f64> = (0..2_000)
            .map(|_| f.generate(SimTime::ZERO, WarehouseId(0)).unwrap().range)
            .collect();
        let mean = ranges.iter().sum::<f64>() / ranges.len() as f64;
        assert!((mean - 40.0).abs() < 2.0, "mean {mean}");
        assert!(ranges.iter().any(|&r| r > 60.0), "Gaussian tail above max_range");
        assert!(ranges.iter().all(|&r| r > 0.0));
    }

    #[test]
    fn same_seed_same_fleet() {
        let make = || -> CamelFactory {
            FleetBuilder::new(77)
                .camel_type(fixed_type("a", 0.3))
                .camel_type(varied_type(0.7))
                .build()
                .unwrap()
        };
        let (mut f1, mut f2) = (make(), make());
        for _ in 0..50 {
            let a = f1.generate(SimTime::ZERO, WarehouseId(0)).unwrap();
            let b = f2.generate(SimTime::ZERO, WarehouseId(0)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn zero_share_type_never_generated() {
        let mut f = FleetBuilder::new(5)
            .camel_type(fixed_type("never", 0.0))
            .camel_type(varied_type(1.0))
            .build()
            .unwrap();
        for _ in 0..200 {
            assert_eq!(f.generate(SimTime::ZERO, WarehouseId(0)).unwrap().kind, CamelTypeId(1));
        }
    }

    #[test]
    fn ideal_camels_use_type_maxima() {
        let f = FleetBuilder::new(0)
            .camel_type(fixed_type("a", 0.5))
            .camel_type(varied_type(0.5))
            .ideal_ratio(0.5)
            .build()
            .unwrap();
        let ideal = f.ideal_camels();
        assert_eq!(ideal.len(), 2);
        assert!(ideal.iter().all(|c| c.is_anonymous()));
        assert_eq!(ideal[1].speed, 2.5);
        assert_eq!(ideal[1].range, 30.0);
        assert_eq!(f.max_speed(), 2.5);
        assert_eq!(f.max_range(), 30.0);
        assert!(f.camel_type(CamelTypeId(2)).is_err());
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use cv_core::{CamelId, CamelTypeId, SimTime, WarehouseId};
    use crate::{CamelStore, FleetBuilder, FleetError};
    use super::helpers::{fixed_type, varied_type};

    #[test]
    fn insert_and_lookup() {
        let mut f = FleetBuilder::new(2)
            .camel_type(fixed_type("a", 0.5))
            .camel_type(varied_type(0.5))
            .build()
            .unwrap();
        let mut store = CamelStore::new();
        for _ in 0..10 {
            let c = f.generate(SimTime::ZERO, WarehouseId(0)).unwrap();
            store.insert(c);
        }
        assert_eq!(store.len(), 10);
        assert_eq!(store.get(CamelId(3)).unwrap().id, CamelId(3));
        store.get_mut(CamelId(3)).unwrap().load = 2;
        assert_eq!(store.get(CamelId(3)).unwrap().load, 2);
        assert!(matches!(store.get(CamelId(10)), Err(FleetError::CamelNotFound(_))));

        let counts = store.count_by_type(2);
        assert_eq!(counts.iter().sum::<usize>(), 10);
        assert_eq!(store.of_type(CamelTypeId(0)).count(), counts[0]);
    }
}

#[cfg(test)]
mod fleet {
    use cv_core::{CamelId, SimTime, WarehouseId};
    use crate::{Fleet, FleetBuilder};
    use super::helpers::fixed_type;

    #[test]
    fn spawn_stores_and_probe_does_not() {
        let factory = FleetBuilder::new(5).camel_type(fixed_type("a", 1.0)).build().unwrap();
        let mut fleet = Fleet::new(factory);
        let a = fleet.spawn(SimTime(1.0), WarehouseId(0)).unwrap();
        let probe = fleet.probe(SimTime(1.0), WarehouseId(0)).unwrap();
        let b = fleet.spawn(SimTime(2.0), WarehouseId(1)).unwrap();

        assert_eq!((a, b), (CamelId(0), CamelId(1)));
        assert!(probe.is_anonymous());
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.camel(b).unwrap().home, WarehouseId(1));
        assert_eq!(fleet.ideal_camels().len(), 1);
    }
}
