use thiserror::Error;

use matchstats_lib::OutputError;
use matchstats_scraper::ScrapeError;

/// Errors that end a command with a non-zero exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Identifier list missing or unreadable
    #[error("Input error: {0}")]
    Input(String),

    /// Invalid settings or arguments
    #[error("Config error: {0}")]
    Config(String),

    /// An output artifact could not be written
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Session or page error outside a batch (e.g. discovery)
    #[error("{0}")]
    Scrape(#[from] ScrapeError),
}

impl CliError {
    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
