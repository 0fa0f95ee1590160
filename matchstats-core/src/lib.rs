//! Data model shared by the extraction, orchestration and output crates.
//!
//! Nothing in here performs I/O: a batch run is described by [`WorkItem`]s,
//! produces [`PlayerRecord`]s and [`FailureRecord`]s, and is split across
//! workers by [`partition`].

pub mod fields;
pub mod model;
pub mod partition;
pub mod record;

pub use model::{ErrorKind, FailureRecord, MatchMetadata, Side, WorkItem};
pub use partition::partition;
pub use record::PlayerRecord;
