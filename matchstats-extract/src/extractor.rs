//! Page -> records.

use matchstats_core::{MatchMetadata, PlayerRecord};
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ExtractionError;
use crate::layout::PageLayout;
use crate::metadata;
use crate::tables::{self, FinalTable, TableSelectors};
use crate::text;

/// Knobs that change extracted values rather than where they are found.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Render dates as `D Mon YYYY` instead of the text as found
    pub normalize_dates: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            normalize_dates: true,
        }
    }
}

/// Result of extracting one page.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub metadata: MatchMetadata,
    pub records: Vec<PlayerRecord>,
}

/// A compiled page layout. Cheap to share between workers.
pub struct Extractor {
    options: ExtractOptions,
    match_header: Selector,
    team_name: Selector,
    img: Selector,
    label: Selector,
    tables: TableSelectors,
    referee_labels: Vec<String>,
    referee_inline: Regex,
    club_tokens: Vec<String>,
    alt_exclude: Vec<String>,
    aggregate_rows: Vec<String>,
}

impl Extractor {
    /// Compile the layout's selectors.
    pub fn new(layout: &PageLayout, options: ExtractOptions) -> Result<Self, ExtractionError> {
        Ok(Self {
            options,
            match_header: parse_selector(&layout.match_header)?,
            team_name: parse_selector(&layout.team_name)?,
            img: parse_selector("img[alt]")?,
            label: parse_selector(&layout.label)?,
            tables: TableSelectors {
                table: parse_selector("table")?,
                header_row: parse_selector("thead tr")?,
                header_cell: parse_selector("th")?,
                header_abbr: parse_selector("abbr[title]")?,
                body_row: parse_selector("tbody tr")?,
                player_cell: parse_selector(&layout.player_cell)?,
                stat_cell: parse_selector(&layout.stat_cell)?,
                any_cell: parse_selector("td")?,
            },
            referee_labels: layout.referee_labels.clone(),
            referee_inline: metadata::inline_label_pattern(&layout.referee_labels)?,
            club_tokens: layout.club_tokens.clone(),
            alt_exclude: layout.alt_exclude.clone(),
            aggregate_rows: layout
                .aggregate_rows
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        })
    }

    /// Extractor for the default layout.
    pub fn with_defaults() -> Result<Self, ExtractionError> {
        Self::new(&PageLayout::default(), ExtractOptions::default())
    }

    /// True once a page shows a match header and at least one player row.
    ///
    /// Session providers poll this while a page renders.
    pub fn is_ready(&self, html: &str) -> bool {
        let document = Html::parse_document(html);
        document.select(&self.match_header).next().is_some()
            && document.select(&self.tables.player_cell).next().is_some()
    }

    /// Parse one rendered page.
    ///
    /// Fails only when the page has neither a match header nor any table;
    /// a match page without player tables yields metadata and no records.
    pub fn extract(
        &self,
        html: &str,
        page_identifier: &str,
        sequence_number: usize,
    ) -> Result<PageExtraction, ExtractionError> {
        let document = Html::parse_document(html);

        let has_header = document.select(&self.match_header).next().is_some();
        let has_table = document.select(&self.tables.table).next().is_some();
        if !has_header && !has_table {
            return Err(ExtractionError::structure(format!(
                "no match header or tables on page for '{}'",
                page_identifier
            )));
        }

        let metadata = self.metadata(&document, page_identifier);
        let candidates = tables::candidate_tables(&document, &self.tables);
        let candidate_count = candidates.len();
        let finals = tables::disambiguate(candidates);

        let mut records = Vec::new();
        for table in &finals {
            self.push_records(&mut records, table, &metadata, sequence_number);
        }

        log::debug!(
            "[{}] {}: {} candidate tables, {} kept, {} player records",
            sequence_number,
            metadata.match_id,
            candidate_count,
            finals.len(),
            records.len(),
        );

        Ok(PageExtraction { metadata, records })
    }

    fn metadata(&self, document: &Html, page_identifier: &str) -> MatchMetadata {
        let flat = text::flatten_text(document);

        let referee = metadata::referee_from_labels(document, &self.label, &self.referee_labels)
            .or_else(|| metadata::referee_from_text(document, &self.referee_inline));

        let mut teams = metadata::team_names(
            document,
            &self.team_name,
            &self.img,
            &self.club_tokens,
            &self.alt_exclude,
        )
        .into_iter();

        MatchMetadata {
            match_id: text::match_id_from_identifier(page_identifier),
            referee: referee.unwrap_or_default(),
            home_team: teams.next().unwrap_or_default(),
            away_team: teams.next().unwrap_or_default(),
            date: text::find_date(&flat, self.options.normalize_dates).unwrap_or_default(),
            round: text::find_round(&flat).unwrap_or_default(),
        }
    }

    fn push_records(
        &self,
        out: &mut Vec<PlayerRecord>,
        table: &FinalTable,
        meta: &MatchMetadata,
        sequence_number: usize,
    ) {
        for row in &table.table.rows {
            if self.is_aggregate(&row.player) {
                continue;
            }
            let mut record =
                PlayerRecord::with_identity(sequence_number, meta, table.side, row.player.clone());
            for (i, value) in row.stats.iter().enumerate() {
                record.push_unique(&table.table.stat_name(i), value.clone());
            }
            out.push(record);
        }
    }

    fn is_aggregate(&self, player: &str) -> bool {
        let lower = player.trim().to_lowercase();
        self.aggregate_rows.iter().any(|s| *s == lower)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/extractor_tests.rs"]
mod tests;
