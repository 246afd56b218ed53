//! Arena of generated camels.
//!
//! Camels are never destroyed once generated, so `CamelId(k)` is simply the
//! k-th slot.  Warehouses and requests refer to camels by id and borrow
//! them from here when needed.

use cv_core::{CamelId, CamelTypeId};

use crate::camel::Camel;
use crate::{FleetError, FleetResult};

#[derive(Default)]
pub struct CamelStore {
    camels: Vec<Camel>,
}

impl CamelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.camels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.camels.is_empty()
    }

    /// Store a freshly generated camel.
    ///
    /// Ids are issued sequentially by the factory, so the camel's id must be
    /// the next free slot.
    pub fn insert(&mut self, camel: Camel) -> CamelId {
        debug_assert_eq!(camel.id.index(), self.camels.len());
        let id = camel.id;
        self.camels.push(camel);
        id
    }

    pub fn get(&self, id: CamelId) -> FleetResult<&Camel> {
        self.camels.get(id.index()).ok_or(FleetError::CamelNotFound(id))
    }

    pub fn get_mut(&mut self, id: CamelId) -> FleetResult<&mut Camel> {
        self.camels.get_mut(id.index()).ok_or(FleetError::CamelNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Camel> {
        self.camels.iter()
    }

    /// Number of stored camels of each type, indexed by `CamelTypeId`.
    pub fn count_by_type(&self, type_count: usize) -> Vec<usize> {
        let mut counts = vec![0; type_count];
        for c in &self.camels {
            if let Some(n) = counts.get_mut(c.kind.index()) {
                *n += 1;
            }
        }
        counts
    }

    /// Ids of all camels of the given type.
    pub fn of_type(&self, kind: CamelTypeId) -> impl Iterator<Item = CamelId> + '_ {
        self.camels.iter().filter(move |c| c.kind == kind).map(|c| c.id)
    }
}
