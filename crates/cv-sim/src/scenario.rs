//! Scenario description and request CSV loading.
//!
//! # Scenario
//!
//! A [`Scenario`] is everything one run needs, in a serde-friendly shape.
//! Node indices in `edges` follow the loader contract: warehouses first
//! (`0..W`), then oases (`W..W+O`).
//!
//! # Request CSV format
//!
//! One row per request.  `oasis` is 1-based, as in hand-written datasets.
//!
//! ```csv
//! arrival,oasis,baskets,deadline
//! 0.0,1,3,40.0
//! 12.5,2,1,30.0
//! ```

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use cv_core::{OasisId, Point, SimConfig};
use cv_fleet::CamelType;
use cv_spatial::StrategyKind;

use crate::warehouse::WarehouseSpec;
use crate::{SimBuilder, SimError, SimResult};

/// A request as supplied by the loader.  `oasis` is 0-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub arrival: f64,
    pub oasis: OasisId,
    pub baskets: u32,
    /// Relative to `arrival`.
    pub deadline: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: SimConfig,
    pub warehouses: Vec<WarehouseSpec>,
    pub oases: Vec<Point>,
    /// Undirected edges as node index pairs.
    pub edges: Vec<(u32, u32)>,
    pub camel_types: Vec<CamelType>,
    #[serde(default)]
    pub requests: Vec<RequestSpec>,
    /// Overrides topology-based strategy selection.
    #[serde(default)]
    pub strategy: Option<StrategyKind>,
}

impl Scenario {
    /// Hand the scenario to a [`SimBuilder`].
    pub fn into_builder(self) -> SimBuilder {
        let builder = SimBuilder::new(self.config)
            .warehouses(self.warehouses)
            .oases(self.oases)
            .edges(self.edges)
            .camel_types(self.camel_types)
            .requests(self.requests);
        match self.strategy {
            Some(kind) => builder.strategy(kind),
            None => builder,
        }
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RequestRecord {
    arrival:  f64,
    oasis:    u32,
    baskets:  u32,
    deadline: f64,
}

/// Load request specs from a CSV file.
pub fn load_requests_csv(path: &Path) -> SimResult<Vec<RequestSpec>> {
    let file = std::fs::File::open(path)?;
    load_requests_reader(file)
}

/// Like [`load_requests_csv`] but accepts any `Read` source.
pub fn load_requests_reader<R: Read>(reader: R) -> SimResult<Vec<RequestSpec>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut specs = Vec::new();

    for (row, result) in csv_reader.deserialize::<RequestRecord>().enumerate() {
        let r = result.map_err(|e| SimError::Parse(e.to_string()))?;
        let oasis = r.oasis.checked_sub(1).ok_or_else(|| {
            SimError::Parse(format!("row {}: oasis index is 1-based, got 0", row + 1))
        })?;
        specs.push(RequestSpec {
            arrival: r.arrival,
            oasis: OasisId(oasis),
            baskets: r.baskets,
            deadline: r.deadline,
        });
    }

    Ok(specs)
}
