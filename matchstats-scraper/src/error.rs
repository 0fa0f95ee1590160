use matchstats_core::ErrorKind;
use matchstats_extract::ExtractionError;
use matchstats_lib::OutputError;

/// Errors that can occur while acquiring sessions, loading pages or
/// persisting run artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Could not open a page session: {0}")]
    SessionAcquisition(String),

    #[error("Page not ready after {secs}s: {address}")]
    PageTimeout { address: String, secs: u64 },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    pub fn session(msg: impl Into<String>) -> Self {
        Self::SessionAcquisition(msg.into())
    }

    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// The failure-record classification for this error when it ends an item.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SessionAcquisition(_) => ErrorKind::SessionAcquisition,
            Self::PageTimeout { .. } => ErrorKind::PageTimeout,
            Self::Navigation(_) | Self::Http(_) | Self::Io(_) => ErrorKind::Navigation,
            Self::Extraction(_) => ErrorKind::StructureMismatch,
            Self::Output(_) | Self::Config(_) => ErrorKind::Internal,
        }
    }
}
