use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unknown program track '{track}' (available: {available:?})")]
    UnknownTrack { track: String, available: Vec<String> },

    #[error("Program track '{track}' is unavailable: {reason}")]
    TrackUnavailable { track: String, reason: String },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Errors a front end should report as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnknownTrack { .. } | Self::TrackUnavailable { .. })
    }

    /// Errors that indicate a failure inside the service rather than a bad request.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Embedding(_) | Self::Io(_) | Self::Csv(_))
    }

    pub fn embedding(err: &anyhow::Error) -> Self {
        Self::Embedding(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
