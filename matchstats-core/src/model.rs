use serde::{Deserialize, Serialize};

/// One page to extract, tagged with its position in the input list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    /// 1-based position in the run's input list. Stable across partitioning.
    pub sequence_number: usize,
    /// Identifier the session provider resolves into a navigable address.
    pub page_identifier: String,
}

impl WorkItem {
    pub fn new(sequence_number: usize, page_identifier: impl Into<String>) -> Self {
        Self {
            sequence_number,
            page_identifier: page_identifier.into(),
        }
    }

    /// Number a list of identifiers in input order, starting at 1.
    pub fn numbered<I, S>(identifiers: I) -> Vec<WorkItem>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        identifiers
            .into_iter()
            .enumerate()
            .map(|(i, id)| WorkItem::new(i + 1, id))
            .collect()
    }
}

/// Match-level facts found once per page and copied into every player row.
///
/// Every field is best-effort: a value that could not be found is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchMetadata {
    pub match_id: String,
    pub referee: String,
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub round: String,
}

impl MatchMetadata {
    /// Team name for the given participant.
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }
}

/// Which participant a statistics table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Away => write!(f, "away"),
        }
    }
}

/// Classification of an item that produced no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The worker could not open its session; every item of its shard fails with this.
    SessionAcquisition,
    /// The page-ready marker never appeared within the bound.
    PageTimeout,
    /// The page could not be loaded at all.
    Navigation,
    /// The page loaded but did not look like a match page.
    StructureMismatch,
    /// The run was cancelled before the item was started.
    Cancelled,
    /// Extraction panicked or the worker died unexpectedly.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionAcquisition => "session_acquisition",
            Self::PageTimeout => "page_timeout",
            Self::Navigation => "navigation",
            Self::StructureMismatch => "structure_mismatch",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }

    pub fn all() -> &'static [ErrorKind] {
        &[
            Self::SessionAcquisition,
            Self::PageTimeout,
            Self::Navigation,
            Self::StructureMismatch,
            Self::Cancelled,
            Self::Internal,
        ]
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed work item. Never retried within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub sequence_number: usize,
    pub page_identifier: String,
    pub kind: ErrorKind,
    pub message: String,
}

impl FailureRecord {
    pub fn new(item: &WorkItem, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            sequence_number: item.sequence_number,
            page_identifier: item.page_identifier.clone(),
            kind,
            message: message.into(),
        }
    }
}
