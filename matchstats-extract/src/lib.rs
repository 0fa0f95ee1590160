//! Turns one rendered match page into player records.
//!
//! Everything here is synchronous and works on an HTML string, so it can be
//! called from any worker without holding a session across the parse.

pub mod discover;
pub mod error;
pub mod extractor;
pub mod layout;
pub mod metadata;
pub mod tables;
pub mod text;

pub use discover::discover_links;
pub use error::ExtractionError;
pub use extractor::{ExtractOptions, Extractor, PageExtraction};
pub use layout::PageLayout;
pub use tables::{BodyRow, CandidateTable, FinalTable, disambiguate};
