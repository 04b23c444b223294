//! Error types for the analytics engine
//!
//! Core computations are total and never fail; errors only come from
//! configuration checks and the opt-in validated entry points.

use shared::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

pub type EngineResult<T> = Result<T, EngineError>;
