use thiserror::Error;

/// Errors raised while building an extractor or parsing a page.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The page does not look like a match page at all
    #[error("Structure mismatch: {0}")]
    StructureMismatch(String),

    /// A configured CSS selector could not be parsed
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// A pattern built from configured labels failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl ExtractionError {
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::StructureMismatch(msg.into())
    }
}
