//! Top-level simulation configuration.
//!
//! Typically loaded from JSON by the application crate (with the `serde`
//! feature) and passed to the simulation builder.  `Default` carries the
//! stock tuning used by the reference datasets.

/// Which single-source strategy to use when neither the centre nor the
/// all-pairs strategy applies.  A static choice, never data-dependent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathHeuristic {
    #[default]
    Dijkstra,
    AStar,
}

/// Simulation tuning knobs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Floyd–Warshall is only eligible when its two `n × n` matrices fit in
    /// this many MiB.
    pub floyd_warshall_max_mib: u64,

    /// Floyd–Warshall is only eligible when `directed_edges / (n (n − 1))`
    /// is at least this value.
    pub floyd_warshall_min_density: f64,

    /// At most this many non-empty warehouses are examined per request pass.
    pub max_warehouses_per_pass: usize,

    /// Single-source fallback strategy.
    pub heuristic: PathHeuristic,

    /// How close the characteristics of "ideal" planning camels are to their
    /// type's maximum (1.0 = exactly the maximum).
    pub ideal_ratio: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                       0,
            floyd_warshall_max_mib:     1024,
            floyd_warshall_min_density: 0.2,
            max_warehouses_per_pass:    10,
            heuristic:                  PathHeuristic::Dijkstra,
            ideal_ratio:                1.0,
        }
    }
}

impl SimConfig {
    /// Stock configuration with a specific seed.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }
}
