//! Individual camels.

use std::fmt;

use cv_core::{CamelId, CamelTypeId, NodeId, SimTime, WarehouseId};

/// A carrier with fixed sampled characteristics.
///
/// Speed and range never change after generation.  Planning probes use
/// anonymous camels whose `id` is [`CamelId::INVALID`]; they are never stored
/// or scheduled.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camel {
    pub id: CamelId,
    pub kind: CamelTypeId,
    pub generated_at: SimTime,
    pub speed: f64,
    /// Distance walkable between drinks.
    pub range: f64,
    pub drink_time: f64,
    pub max_load: u32,
    /// Baskets currently carried.
    pub load: u32,
    /// Last node the camel was seen at.
    pub location: NodeId,
    pub home: WarehouseId,
}

impl Camel {
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.id == CamelId::INVALID
    }

    /// Load to carry for a request still missing `needed` baskets.
    #[inline]
    pub fn load_for(&self, needed: u32) -> u32 {
        self.max_load.min(needed)
    }

    /// Re-home this camel at `home`, placing it there.
    pub fn set_home(&mut self, home: WarehouseId) {
        self.home = home;
        self.location = home.node();
    }
}

impl fmt::Display for Camel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Camel[{} type={} home={} load={} at={}]",
            self.id.0, self.kind.0, self.home.0, self.load, self.location.0
        )
    }
}
