//! Fleet error type.

use thiserror::Error;

use cv_core::{CamelId, CamelTypeId, CoreError};

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("at least one camel type is required")]
    NoCamelTypes,

    #[error("camel type {name:?}: {reason}")]
    InvalidCamelType { name: String, reason: String },

    #[error("camel type shares sum to {0}, expected 1")]
    SharesDoNotSumToOne(f64),

    #[error("camel {0} not found")]
    CamelNotFound(CamelId),

    #[error("camel type {0} not found")]
    CamelTypeNotFound(CamelTypeId),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FleetResult<T> = Result<T, FleetError>;
