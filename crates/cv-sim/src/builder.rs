//! Fluent builder for constructing a [`Sim`].

use cv_core::{NodeId, Point, SimConfig, SimTime, WarehouseId};
use cv_fleet::{CamelType, Fleet, FleetBuilder};
use cv_spatial::{NetworkBuilder, Strategy, StrategyKind};

use crate::dispatch::Dispatcher;
use crate::scenario::RequestSpec;
use crate::warehouse::{Warehouse, WarehouseSpec};
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// Everything is validated in [`SimBuilder::build`], before any event runs.
/// Edges longer than the best camel's range are dropped there too, since
/// nothing could ever walk them.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::with_seed(7))
///     .warehouse(WarehouseSpec { position: Point::new(0.0, 0.0), refill_count: 5,
///                                refill_interval: 50.0, manipulation_time: 0.5 })
///     .oasis(Point::new(10.0, 0.0))
///     .edge(NodeId(0), NodeId(1))
///     .camel_type(bactrian)
///     .request(RequestSpec { arrival: 0.0, oasis: OasisId(0), baskets: 3, deadline: 40.0 })
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:      SimConfig,
    warehouses:  Vec<WarehouseSpec>,
    oases:       Vec<Point>,
    edges:       Vec<(u32, u32)>,
    camel_types: Vec<CamelType>,
    requests:    Vec<RequestSpec>,
    strategy:    Option<StrategyKind>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            warehouses:  Vec::new(),
            oases:       Vec::new(),
            edges:       Vec::new(),
            camel_types: Vec::new(),
            requests:    Vec::new(),
            strategy:    None,
        }
    }

    pub fn warehouse(mut self, spec: WarehouseSpec) -> Self {
        self.warehouses.push(spec);
        self
    }

    pub fn warehouses(mut self, specs: impl IntoIterator<Item = WarehouseSpec>) -> Self {
        self.warehouses.extend(specs);
        self
    }

    pub fn oasis(mut self, pos: Point) -> Self {
        self.oases.push(pos);
        self
    }

    pub fn oases(mut self, positions: impl IntoIterator<Item = Point>) -> Self {
        self.oases.extend(positions);
        self
    }

    /// Connect two nodes.  Warehouses are numbered first, then oases.
    pub fn edge(mut self, a: NodeId, b: NodeId) -> Self {
        self.edges.push((a.0, b.0));
        self
    }

    pub fn edges(mut self, edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.edges.extend(edges);
        self
    }

    pub fn camel_type(mut self, t: CamelType) -> Self {
        self.camel_types.push(t);
        self
    }

    pub fn camel_types(mut self, types: impl IntoIterator<Item = CamelType>) -> Self {
        self.camel_types.extend(types);
        self
    }

    pub fn request(mut self, spec: RequestSpec) -> Self {
        self.requests.push(spec);
        self
    }

    pub fn requests(mut self, specs: impl IntoIterator<Item = RequestSpec>) -> Self {
        self.requests.extend(specs);
        self
    }

    /// Use `kind` instead of selecting a strategy from the topology.
    pub fn strategy(mut self, kind: StrategyKind) -> Self {
        self.strategy = Some(kind);
        self
    }

    /// Validate inputs, build the network, fleet and dispatcher, register
    /// the requests and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        // ── Fleet ─────────────────────────────────────────────────────────
        let factory = FleetBuilder::new(self.config.seed)
            .camel_types(self.camel_types)
            .ideal_ratio(self.config.ideal_ratio)
            .build()?;

        // ── Network ───────────────────────────────────────────────────────
        for (i, w) in self.warehouses.iter().enumerate() {
            validate_warehouse(i, w)?;
        }
        if let Some(p) = self.oases.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(SimError::Config(format!("oasis position {p} is not finite")));
        }

        let node_count = self.warehouses.len() + self.oases.len();
        let mut nb = NetworkBuilder::with_capacity(node_count, self.edges.len())
            .max_edge_length(factory.max_range());
        for w in &self.warehouses {
            nb.add_warehouse(w.position)?;
        }
        for &p in &self.oases {
            nb.add_oasis(p);
        }
        for &(a, b) in &self.edges {
            if a as usize >= node_count || b as usize >= node_count {
                return Err(SimError::Config(format!(
                    "edge ({a}, {b}) names a node outside 0..{node_count}"
                )));
            }
            nb.add_edge(NodeId(a), NodeId(b))?;
        }
        let network = nb.build();

        let dispatcher = match self.strategy {
            Some(kind) => {
                Dispatcher::with_strategy(Strategy::build(kind, &network)?, &network, &self.config)
            }
            None => Dispatcher::new(&network, &self.config),
        };

        let warehouses = self
            .warehouses
            .iter()
            .enumerate()
            .map(|(i, spec)| Warehouse::new(WarehouseId(i as u32), spec))
            .collect();

        // ── Requests ──────────────────────────────────────────────────────
        let mut sim = Sim::new(self.config, network, dispatcher, warehouses, Fleet::new(factory));
        for r in self.requests {
            if !r.arrival.is_finite() || r.arrival < 0.0 {
                return Err(SimError::Config(format!("request arrival {} is negative", r.arrival)));
            }
            sim.submit(r.oasis, r.baskets, SimTime(r.arrival), r.deadline)?;
        }
        sim.test_end();
        Ok(sim)
    }
}

fn validate_warehouse(index: usize, w: &WarehouseSpec) -> SimResult<()> {
    let fail = |reason: &str| -> SimResult<()> {
        Err(SimError::Config(format!("warehouse {index}: {reason}")))
    };
    if !(w.position.x.is_finite() && w.position.y.is_finite()) {
        return fail("position is not finite");
    }
    if !(w.refill_interval.is_finite() && w.refill_interval > 0.0) {
        return fail("refill interval must be positive");
    }
    if !(w.manipulation_time.is_finite() && w.manipulation_time >= 0.0) {
        return fail("manipulation time must not be negative");
    }
    Ok(())
}
