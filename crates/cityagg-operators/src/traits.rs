//! Operator error type shared by the evaluation kernels.

use cityagg_core::error::Error as CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("invalid filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("filter '{filter}' of operation '{operation}' matched no entities")]
    EmptySelection { operation: String, filter: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<OpError> for CoreError {
    fn from(e: OpError) -> Self {
        match e {
            OpError::InvalidFilter { .. } => CoreError::MalformedInput(e.to_string()),
            OpError::EmptySelection { operation, filter } => {
                CoreError::EmptySelection { operation, filter }
            }
            OpError::Core(inner) => inner,
        }
    }
}
