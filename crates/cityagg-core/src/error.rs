use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy shared by every layer of the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("output write failed: {0}")]
    OutputWrite(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("filter '{filter}' of operation '{operation}' matched no entities")]
    EmptySelection { operation: String, filter: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl Error {
    /// Input-class failures: the run is aborted cleanly and logged.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Error::MalformedInput(_) | Error::EmptySelection { .. }
        )
    }

    /// True for every failure the top-level driver logs and swallows.
    /// `UnsupportedOperation` always propagates.
    pub fn is_recoverable(&self) -> bool {
        self.is_input() || matches!(self, Error::OutputWrite(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::OutputWrite(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Config(e.to_string())
    }
}
