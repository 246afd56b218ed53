//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface it.

use thiserror::Error;

use crate::{CamelTypeId, NodeId};

/// The top-level error type for `cv-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("camel type {0} not found")]
    CamelTypeNotFound(CamelTypeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid distribution parameters: {0}")]
    Distribution(String),
}

/// Shorthand result type for `cv-core`.
pub type CoreResult<T> = Result<T, CoreError>;
