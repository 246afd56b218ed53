//! Deterministic simulation-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! The whole run draws from a single `SmallRng` seeded from
//! `SimConfig::seed`.  Because the simulation is single-threaded and events
//! are processed in a fixed order, the sequence of draws (and therefore the
//! generated camel fleet) is identical for identical inputs and seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::{CoreError, CoreResult};

/// Simulation-level RNG.
///
/// Used only from the single logical simulation thread.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Uniform sample in `[low, high]`.  Returns `low` for a degenerate range.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        low + self.unit() * (high - low)
    }

    /// Gaussian sample with the given mean and standard deviation.
    ///
    /// A zero deviation returns `mean` exactly; a negative or NaN one is an
    /// error.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> CoreResult<f64> {
        if !(std_dev >= 0.0) {
            return Err(CoreError::Distribution(format!("standard deviation {std_dev} is negative")));
        }
        if std_dev == 0.0 {
            return Ok(mean);
        }
        let dist = Normal::new(mean, std_dev)
            .map_err(|e| CoreError::Distribution(e.to_string()))?;
        Ok(dist.sample(&mut self.0))
    }
}
