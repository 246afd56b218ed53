//! Spatial-subsystem error type.

use thiserror::Error;

use cv_core::NodeId;

/// Errors produced by `cv-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("warehouse added after oasis {0}; warehouses must occupy the lowest node indices")]
    WarehouseAfterOasis(NodeId),

    #[error("network is not a star topology; the centre strategy does not apply")]
    NotAStar,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
