use thiserror::Error;

/// Errors writing or reading run artifacts (records, failure log,
/// identifier lists, settings).
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error on an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Settings file is not valid TOML or has wrong field types
    #[error("Settings error: {0}")]
    Settings(String),
}

impl OutputError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
