//! The factory and the arena it feeds, owned together.

use cv_core::{CamelId, SimTime, WarehouseId};

use crate::{Camel, CamelFactory, CamelStore, FleetResult};

/// Every camel in the run plus the factory that makes new ones.
pub struct Fleet {
    pub factory: CamelFactory,
    pub camels: CamelStore,
}

impl Fleet {
    pub fn new(factory: CamelFactory) -> Self {
        Self { factory, camels: CamelStore::new() }
    }

    /// Generate, store and return the id of a new camel homed at `home`.
    pub fn spawn(&mut self, now: SimTime, home: WarehouseId) -> FleetResult<CamelId> {
        let camel = self.factory.generate(now, home)?;
        Ok(self.camels.insert(camel))
    }

    /// Sample a planning-only camel.  Nothing is stored.
    pub fn probe(&mut self, now: SimTime, home: WarehouseId) -> FleetResult<Camel> {
        self.factory.generate_anonymous(now, home)
    }

    pub fn camel(&self, id: CamelId) -> FleetResult<&Camel> {
        self.camels.get(id)
    }

    pub fn camel_mut(&mut self, id: CamelId) -> FleetResult<&mut Camel> {
        self.camels.get_mut(id)
    }

    pub fn ideal_camels(&self) -> &[Camel] {
        self.factory.ideal_camels()
    }

    pub fn len(&self) -> usize {
        self.camels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camels.is_empty()
    }
}
