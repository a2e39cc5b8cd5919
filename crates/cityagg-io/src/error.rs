use std::path::Path;

use cityagg_core::error::Error as CoreError;
use thiserror::Error;

/// Result type local to cityagg-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("xml error at byte {position}: {reason}")]
    Xml { position: u64, reason: String },

    #[error("<{element}> #{index}: {reason}")]
    Record {
        element: &'static str,
        index: usize,
        reason: String,
    },

    #[error("{0}")]
    Document(String),
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Classify as a failure to read the run's inputs.
    pub fn into_input(self) -> CoreError {
        CoreError::MalformedInput(self.to_string())
    }

    /// Classify as a failure to produce the run's output.
    pub fn into_output(self) -> CoreError {
        CoreError::OutputWrite(self.to_string())
    }
}
