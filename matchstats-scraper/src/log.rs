use std::fs::OpenOptions;
use std::path::Path;

use matchstats_core::{ErrorKind, FailureRecord};
use matchstats_lib::OutputError;

/// Failed items of one run, written as an append-only CSV artifact.
#[derive(Debug, Default)]
pub struct FailureLog {
    entries: Vec<FailureRecord>,
}

impl FailureLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: FailureRecord) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[FailureRecord] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> LogSummary {
        let mut summary = LogSummary::default();
        for kind in ErrorKind::all() {
            let count = self.entries.iter().filter(|e| e.kind == *kind).count();
            if count > 0 {
                summary.by_kind.push((*kind, count));
            }
        }
        summary.total = self.entries.len();
        summary
    }

    /// Append this run's failures to `path`, sorted by sequence number.
    ///
    /// The `seq,page,error_kind,message` header is written only when the file
    /// is new or empty, so repeated runs accumulate in one artifact.
    /// Returns the number of rows appended.
    pub fn append_to_file(&self, path: &Path) -> Result<usize, OutputError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(["seq", "page", "error_kind", "message"])?;
        }

        let mut sorted: Vec<&FailureRecord> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.sequence_number);
        for entry in &sorted {
            writer.write_record([
                entry.sequence_number.to_string().as_str(),
                entry.page_identifier.as_str(),
                entry.kind.as_str(),
                entry.message.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(sorted.len())
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub total: usize,
    /// Non-zero counts, in [`ErrorKind::all`] order
    pub by_kind: Vec<(ErrorKind, usize)>,
}
