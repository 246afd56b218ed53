//! Fluent builder for a [`CamelFactory`].
//!
//! # Usage
//!
//! ```rust
//! use cv_fleet::{CamelType, FleetBuilder};
//!
//! let factory = FleetBuilder::new(/*seed=*/ 42)
//!     .camel_type(CamelType {
//!         name: "Bactrian".into(),
//!         min_speed: 2.0, max_speed: 4.0,
//!         min_range: 20.0, max_range: 40.0,
//!         drink_time: 1.0, max_load: 3, share: 1.0,
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(factory.types().len(), 1);
//! assert_eq!(factory.max_speed(), 4.0);
//! ```

use crate::{CamelFactory, CamelType, FleetResult};

pub struct FleetBuilder {
    seed: u64,
    ideal_ratio: f64,
    types: Vec<CamelType>,
}

impl FleetBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed, ideal_ratio: 1.0, types: Vec::new() }
    }

    /// Register a camel type.  Types keep their registration order as ids.
    pub fn camel_type(mut self, t: CamelType) -> Self {
        self.types.push(t);
        self
    }

    pub fn camel_types(mut self, types: impl IntoIterator<Item = CamelType>) -> Self {
        self.types.extend(types);
        self
    }

    /// Fraction of each type's maximum used for ideal planning camels.
    pub fn ideal_ratio(mut self, ratio: f64) -> Self {
        self.ideal_ratio = ratio;
        self
    }

    /// Validate the type table and construct the factory.
    pub fn build(self) -> FleetResult<CamelFactory> {
        CamelFactory::new(self.types, self.ideal_ratio, self.seed)
    }
}
