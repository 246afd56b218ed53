//! Camel type table entries.

use crate::{FleetError, FleetResult};

/// Tolerance applied when checking that type shares sum to one.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Static characteristics shared by every camel of one kind.
///
/// Speed and range are ranges; each generated camel samples a fixed value
/// inside them once.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CamelType {
    pub name: String,
    pub min_speed: f64,
    pub max_speed: f64,
    /// Distance a camel can walk between drinks.
    pub min_range: f64,
    pub max_range: f64,
    pub drink_time: f64,
    /// Baskets carried at most.
    pub max_load: u32,
    /// Fraction of generated camels that are of this type.
    pub share: f64,
}

impl CamelType {
    /// Check bounds.  Called by the factory before any camel is generated.
    pub fn validate(&self) -> FleetResult<()> {
        let fail = |reason: &str| -> FleetResult<()> {
            Err(FleetError::InvalidCamelType { name: self.name.clone(), reason: reason.to_owned() })
        };
        let finite = [
            self.min_speed, self.max_speed, self.min_range, self.max_range,
            self.drink_time, self.share,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return fail("all values must be finite");
        }
        if self.min_speed <= 0.0 || self.min_range <= 0.0 {
            return fail("speed and range must be positive");
        }
        if self.min_speed > self.max_speed {
            return fail("min speed exceeds max speed");
        }
        if self.min_range > self.max_range {
            return fail("min range exceeds max range");
        }
        if self.drink_time < 0.0 {
            return fail("drink time must not be negative");
        }
        if self.max_load == 0 {
            return fail("max load must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.share) {
            return fail("share must lie in [0, 1]");
        }
        Ok(())
    }

    /// Centre of the range distribution.
    #[inline]
    pub fn mean_range(&self) -> f64 {
        (self.min_range + self.max_range) / 2.0
    }

    /// Standard deviation of the range distribution.
    #[inline]
    pub fn range_std_dev(&self) -> f64 {
        (self.max_range - self.min_range) / 4.0
    }
}
