//! Schema-union CSV writer.
//!
//! Records from different pages carry different statistic columns. The
//! output schema is the union of every field name seen: the identity fields
//! first (in their fixed order, when present), then everything else sorted
//! lexically. A record lacking a column writes an empty cell.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use matchstats_core::PlayerRecord;
use matchstats_core::fields;

use crate::error::OutputError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Prefix the file with a byte order mark so spreadsheet tools detect UTF-8
    pub excel_bom: bool,
}

/// Ordered column list for a set of records.
pub fn schema_union<'a>(records: impl IntoIterator<Item = &'a PlayerRecord>) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        seen.extend(record.keys());
    }

    let mut columns: Vec<String> = fields::PRIORITY
        .iter()
        .filter(|name| seen.contains(**name))
        .map(|name| name.to_string())
        .collect();
    columns.extend(
        seen.into_iter()
            .filter(|name| !fields::is_priority(name))
            .map(str::to_string),
    );
    columns
}

/// Serialize `records` as CSV with a header row. Returns the columns written.
///
/// With no columns at all (no records, or only empty ones) nothing is
/// written: an empty CSV record would read back as one unnamed column.
pub fn write_records<W: Write>(
    writer: W,
    records: &[PlayerRecord],
) -> Result<Vec<String>, OutputError> {
    let columns = schema_union(records);
    if columns.is_empty() {
        return Ok(columns);
    }
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&columns)?;
    for record in records {
        csv.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
    }
    csv.flush()?;
    Ok(columns)
}

/// Write `records` to `path`, replacing any existing file atomically.
///
/// Returns the number of data rows written.
pub fn write_records_to_path(
    path: &Path,
    records: &[PlayerRecord],
    options: WriteOptions,
) -> Result<usize, OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("csv.tmp");
    {
        let mut file = std::io::BufWriter::new(std::fs::File::create(&tmp)?);
        if options.excel_bom {
            file.write_all(UTF8_BOM)?;
        }
        let columns = write_records(&mut file, records)?;
        file.flush()?;
        log::debug!(
            "Wrote {} rows x {} columns to {}",
            records.len(),
            columns.len(),
            tmp.display()
        );
    }
    std::fs::rename(&tmp, path)?;
    Ok(records.len())
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
