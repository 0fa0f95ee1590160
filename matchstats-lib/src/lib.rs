//! Plumbing shared by the scraper and the CLI: the shard pool, event
//! draining, settings, identifier lists and the CSV writer.

pub mod async_util;
pub mod error;
pub mod identifiers;
pub mod settings;
pub mod worker_pool;
pub mod writer;

pub use error::OutputError;
pub use settings::Settings;
pub use worker_pool::ShardPool;
pub use writer::{WriteOptions, schema_union, write_records, write_records_to_path};
