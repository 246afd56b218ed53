use thiserror::Error;

use cv_core::{CamelId, CoreError, RequestId, SimTime, WarehouseId};
use cv_fleet::FleetError;
use cv_spatial::SpatialError;

use crate::queue::EventId;
use crate::request::RequestState;

/// A broken internal guarantee.  Always fatal.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantViolation {
    #[error("event {0:?} is not queued")]
    EventNotQueued(EventId),

    #[error("warehouse {warehouse} asked for {requested} baskets but holds {available}")]
    InventoryUnderflow { warehouse: WarehouseId, requested: u32, available: u32 },

    #[error("camel {camel} is not en route for request {request}")]
    CamelNotEnRoute { camel: CamelId, request: RequestId },

    #[error("camel {camel} is not away from warehouse {warehouse}")]
    CamelNotAway { camel: CamelId, warehouse: WarehouseId },

    #[error("simulation ended with request {request} in state {state}")]
    RequestNotTerminal { request: RequestId, state: RequestState },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("request {request} missed its deadline at {time}")]
    DeadlineBreach { request: RequestId, time: SimTime },

    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("simulation halted after a fatal error")]
    Halted,

    #[error("request {0} not found")]
    UnknownRequest(RequestId),

    #[error("request {request} cannot be cancelled while {state}")]
    NotCancellable { request: RequestId, state: RequestState },

    #[error("cannot schedule at {at}: clock is already at {now}")]
    InThePast { at: SimTime, now: SimTime },

    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl SimError {
    /// Whether this error stops the run for good.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SimError::DeadlineBreach { .. } | SimError::Invariant(_) | SimError::Halted)
    }
}

pub type SimResult<T> = Result<T, SimError>;
