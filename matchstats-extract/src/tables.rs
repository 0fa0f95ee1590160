//! Candidate statistics tables and home/away disambiguation.

use std::collections::HashSet;

use matchstats_core::Side;
use scraper::{ElementRef, Html, Selector};

use crate::text::{collapse_whitespace, element_text};

/// One body row of a candidate table: the player cell plus raw stat values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRow {
    pub player: String,
    pub stats: Vec<String>,
}

/// A table with at least one row carrying a player-name cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTable {
    /// Header names in column order; the first is the player column.
    pub headers: Vec<String>,
    pub rows: Vec<BodyRow>,
}

impl CandidateTable {
    /// Player name of the first body row.
    pub fn first_player(&self) -> Option<&str> {
        self.rows.first().map(|r| r.player.as_str())
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.player.as_str())
    }

    /// Statistic name for the `index`-th stat cell of a row.
    ///
    /// Stat cells are offset by one from the headers because the first
    /// header labels the player column. Missing or blank headers fall back
    /// to `stat_<index>`.
    pub fn stat_name(&self, index: usize) -> String {
        self.headers
            .get(index + 1)
            .filter(|h| !h.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("stat_{index}"))
    }
}

/// A candidate accepted for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalTable {
    pub side: Side,
    pub table: CandidateTable,
}

/// Compiled selectors needed to read tables.
pub(crate) struct TableSelectors {
    pub table: Selector,
    pub header_row: Selector,
    pub header_cell: Selector,
    pub header_abbr: Selector,
    pub body_row: Selector,
    pub player_cell: Selector,
    pub stat_cell: Selector,
    pub any_cell: Selector,
}

/// Read every table on the page that has at least one player row.
pub(crate) fn candidate_tables(document: &Html, sel: &TableSelectors) -> Vec<CandidateTable> {
    document
        .select(&sel.table)
        .filter_map(|table| read_table(&table, sel))
        .collect()
}

fn read_table(table: &ElementRef<'_>, sel: &TableSelectors) -> Option<CandidateTable> {
    let rows: Vec<BodyRow> = table
        .select(&sel.body_row)
        .filter_map(|row| read_row(&row, sel))
        .collect();
    if rows.is_empty() {
        return None;
    }

    let headers = table
        .select(&sel.header_row)
        .next()
        .map(|row| {
            row.select(&sel.header_cell)
                .map(|th| header_name(&th, sel))
                .collect()
        })
        .unwrap_or_default();

    Some(CandidateTable { headers, rows })
}

/// Prefer a descriptive `title` (on an inner `abbr` or the cell itself)
/// over the visible, usually abbreviated, text.
fn header_name(th: &ElementRef<'_>, sel: &TableSelectors) -> String {
    let abbr_title = th
        .select(&sel.header_abbr)
        .find_map(|abbr| abbr.value().attr("title"))
        .map(collapse_whitespace)
        .filter(|t| !t.is_empty());
    if let Some(title) = abbr_title {
        return title;
    }
    th.value()
        .attr("title")
        .map(collapse_whitespace)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| element_text(th))
}

fn read_row(row: &ElementRef<'_>, sel: &TableSelectors) -> Option<BodyRow> {
    let player = element_text(&row.select(&sel.player_cell).next()?);

    let mut stats: Vec<String> = row.select(&sel.stat_cell).map(|td| cell_value(&td)).collect();
    if stats.is_empty() {
        stats = row.select(&sel.any_cell).map(|td| cell_value(&td)).collect();
    }

    Some(BodyRow { player, stats })
}

/// The machine-readable sort value when present, otherwise the rendered text.
fn cell_value(td: &ElementRef<'_>) -> String {
    match td.value().attr("data-srt") {
        Some(v) => v.trim().to_string(),
        None => element_text(td),
    }
}

/// Pick at most one home and one away table out of the page's candidates.
///
/// The first candidate is home. Later candidates whose first player already
/// appears in the home table are treated as a second rendering of the home
/// side (summary vs. detail views) and skipped. The first candidate that
/// passes that check becomes away and scanning stops.
///
/// Only the first row is compared. If the away side's first player shares a
/// name with a home player, the real away table is skipped and the next
/// candidate (if any) is taken instead.
pub fn disambiguate(candidates: Vec<CandidateTable>) -> Vec<FinalTable> {
    let mut candidates = candidates.into_iter();
    let Some(home) = candidates.next() else {
        return Vec::new();
    };

    let home_players: HashSet<String> = home.players().map(str::to_string).collect();
    let mut finals = vec![FinalTable {
        side: Side::Home,
        table: home,
    }];

    for (offset, candidate) in candidates.enumerate() {
        match candidate.first_player() {
            Some(first) if !home_players.contains(first) => {
                finals.push(FinalTable {
                    side: Side::Away,
                    table: candidate,
                });
                break;
            }
            first => {
                log::debug!(
                    "Skipping candidate table {} as a duplicate of home (first player: {:?})",
                    offset + 1,
                    first,
                );
            }
        }
    }

    finals
}

#[cfg(test)]
#[path = "tests/tables_tests.rs"]
mod tests;
