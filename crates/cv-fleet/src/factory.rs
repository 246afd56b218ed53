//! Camel generation.
//!
//! # Sampling
//!
//! - **Type**: chosen by cumulative population share.
//! - **Speed**: uniform in `[min_speed, max_speed]`.
//! - **Range**: Gaussian with mean `(min + max) / 2` and standard deviation
//!   `(max − min) / 4`, clamped to stay positive but not to the type's
//!   bounds.
//!
//! Every draw comes from the factory's own `SimRng`, so a fixed seed yields
//! the same fleet in the same order.
//!
//! # Ideal camels
//!
//! One anonymous camel per type with `ideal_ratio × max` speed and range.
//! They give cheap upper bounds: if no ideal camel can make a trip, no
//! generated camel can.

use tracing::trace;

use cv_core::{CamelId, CamelTypeId, NodeId, SimRng, SimTime, WarehouseId};

use crate::camel::Camel;
use crate::camel_type::{CamelType, SHARE_TOLERANCE};
use crate::{FleetError, FleetResult};

pub struct CamelFactory {
    types: Vec<CamelType>,
    ideal: Vec<Camel>,
    max_speed: f64,
    max_range: f64,
    next_id: u32,
    rng: SimRng,
}

impl CamelFactory {
    /// Validate `types` and prepare ideal camels.
    pub fn new(types: Vec<CamelType>, ideal_ratio: f64, seed: u64) -> FleetResult<Self> {
        if types.is_empty() {
            return Err(FleetError::NoCamelTypes);
        }
        for t in &types {
            t.validate()?;
        }
        let total: f64 = types.iter().map(|t| t.share).sum();
        if (total - 1.0).abs() > SHARE_TOLERANCE {
            return Err(FleetError::SharesDoNotSumToOne(total));
        }

        let ideal: Vec<Camel> = types
            .iter()
            .enumerate()
            .map(|(i, t)| Camel {
                id:           CamelId::INVALID,
                kind:         CamelTypeId(i as u16),
                generated_at: SimTime::ZERO,
                speed:        ideal_ratio * t.max_speed,
                range:        ideal_ratio * t.max_range,
                drink_time:   t.drink_time,
                max_load:     t.max_load,
                load:         0,
                location:     NodeId::INVALID,
                home:         WarehouseId::INVALID,
            })
            .collect();
        let max_speed = ideal.iter().map(|c| c.speed).fold(0.0, f64::max);
        let max_range = ideal.iter().map(|c| c.range).fold(0.0, f64::max);

        Ok(Self { types, ideal, max_speed, max_range, next_id: 0, rng: SimRng::new(seed) })
    }

    pub fn types(&self) -> &[CamelType] {
        &self.types
    }

    pub fn camel_type(&self, id: CamelTypeId) -> FleetResult<&CamelType> {
        self.types.get(id.index()).ok_or(FleetError::CamelTypeNotFound(id))
    }

    /// One best-case anonymous camel per type.
    pub fn ideal_camels(&self) -> &[Camel] {
        &self.ideal
    }

    /// Fastest ideal speed across all types.
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Longest ideal range across all types.
    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    /// Number of identified camels generated so far.
    pub fn generated_count(&self) -> u32 {
        self.next_id
    }

    /// Generate a new identified camel homed at `home`.
    pub fn generate(&mut self, now: SimTime, home: WarehouseId) -> FleetResult<Camel> {
        let id = CamelId(self.next_id);
        let camel = self.sample(id, now, home)?;
        self.next_id += 1;
        trace!(camel = %id, kind = camel.kind.0, speed = camel.speed, range = camel.range, "camel generated");
        Ok(camel)
    }

    /// Generate a planning-only camel.  Does not consume an id.
    pub fn generate_anonymous(&mut self, now: SimTime, home: WarehouseId) -> FleetResult<Camel> {
        self.sample(CamelId::INVALID, now, home)
    }

    fn pick_type(&mut self) -> CamelTypeId {
        let mut draw = self.rng.unit();
        for (i, t) in self.types.iter().enumerate() {
            if draw <= t.share {
                return CamelTypeId(i as u16);
            }
            draw -= t.share;
        }
        // Rounding left a sliver past the last share.
        CamelTypeId((self.types.len() - 1) as u16)
    }

    /// Draw one camel.  Speed stays within the type's bounds; range is only
    /// kept positive, so a Gaussian tail may land outside
    /// `[min_range, max_range]`.
    fn sample(&mut self, id: CamelId, now: SimTime, home: WarehouseId) -> FleetResult<Camel> {
        let kind = self.pick_type();
        let t = &self.types[kind.index()];
        let (min_speed, max_speed) = (t.min_speed, t.max_speed);
        let (mean, std_dev) = (t.mean_range(), t.range_std_dev());
        let (drink_time, max_load) = (t.drink_time, t.max_load);

        let speed = self.rng.uniform(min_speed, max_speed);
        let range = self.rng.normal(mean, std_dev)?.max(f64::MIN_POSITIVE);

        Ok(Camel {
            id,
            kind,
            generated_at: now,
            speed,
            range,
            drink_time,
            max_load,
            load: 0,
            location: home.node(),
            home,
        })
    }
}
