//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into arena `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.
//!
//! Node numbering follows the loader contract: warehouses occupy node indices
//! `0..W`, oases occupy `W..W+O`.  `WarehouseId(k)` is therefore also
//! `NodeId(k)`, while `OasisId(k)` is `NodeId(W + k)`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID": the inner type's `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a graph node (warehouse or oasis).
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed edge in the CSR edge arrays.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a warehouse.  Numerically equal to its `NodeId`.
    pub struct WarehouseId(u32);
}

typed_id! {
    /// Index of an oasis among oases only (0-based).
    pub struct OasisId(u32);
}

typed_id! {
    /// Sequential identity of a generated camel.  Anonymous planning camels
    /// carry `CamelId::INVALID`.
    pub struct CamelId(u32);
}

typed_id! {
    /// Sequential identity of a delivery request.
    pub struct RequestId(u32);
}

typed_id! {
    /// Index of a camel type in the loaded type table.
    pub struct CamelTypeId(u16);
}

impl WarehouseId {
    /// The graph node this warehouse occupies.
    #[inline]
    pub fn node(self) -> NodeId {
        NodeId(self.0)
    }
}

impl OasisId {
    /// The graph node this oasis occupies, given the number of warehouses.
    #[inline]
    pub fn node(self, warehouse_count: usize) -> NodeId {
        NodeId(self.0 + warehouse_count as u32)
    }
}

impl NodeId {
    /// `true` when this node index falls in the oasis range.
    #[inline]
    pub fn is_oasis(self, warehouse_count: usize) -> bool {
        self.index() >= warehouse_count
    }

    /// Interpret this node as a warehouse, if it is one.
    #[inline]
    pub fn as_warehouse(self, warehouse_count: usize) -> Option<WarehouseId> {
        (!self.is_oasis(warehouse_count)).then_some(WarehouseId(self.0))
    }

    /// Interpret this node as an oasis, if it is one.
    #[inline]
    pub fn as_oasis(self, warehouse_count: usize) -> Option<OasisId> {
        self.is_oasis(warehouse_count)
            .then(|| OasisId(self.0 - warehouse_count as u32))
    }
}
