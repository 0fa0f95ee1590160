//! Batch extraction over page sessions.
//!
//! [`run_batch`] drives the extractor across a worker pool, one session per
//! worker. Sessions come from a [`SessionProvider`]: saved snapshots, plain
//! HTTP, or (with the `browser` feature) headless Chrome.

pub mod batch;
#[cfg(feature = "browser")]
pub mod browser;
pub mod discover;
pub mod error;
pub mod http;
pub mod log;
pub mod session;
pub mod snapshot;

pub use batch::{BatchControl, BatchEvent, BatchOptions, BatchProgress, BatchResult, run_batch};
#[cfg(feature = "browser")]
pub use browser::BrowserProvider;
pub use discover::discover_matches;
pub use error::ScrapeError;
pub use http::HttpProvider;
pub use log::{FailureLog, LogSummary};
pub use session::{PageSession, SessionProvider, resolve_address};
pub use snapshot::SnapshotProvider;
