//! Free-text scanners: dates, round numbers, match ids, whitespace.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Node};

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";

/// `15 August 2025`, `5 Aug 2025`
static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(\d{{1,2}})\s+({MONTHS})\.?,?\s+(\d{{4}})\b"))
        .expect("static pattern")
});

/// `August 15, 2025`, `Aug 5 2025`
static MONTH_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({MONTHS})\.?\s+(\d{{1,2}}),?\s+(\d{{4}})\b"))
        .expect("static pattern")
});

static ROUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Matchweek|Jornada|Round)\s+(\d+)").expect("static pattern")
});

static MATCH_VIEW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/match/view/([a-z0-9]+)").expect("static pattern"));

/// Find the first date in `text`.
///
/// Both `D Month YYYY` and `Month D[,] YYYY` are recognised, with full or
/// three-letter month names, case-insensitively. The earliest match in the
/// text wins; candidates that are not real calendar dates are skipped. With
/// `normalize` the result is rendered `D Mon YYYY`, otherwise the matched
/// text is returned as found.
pub fn find_date(text: &str, normalize: bool) -> Option<String> {
    let mut candidates: Vec<(usize, Captures<'_>, bool)> = DAY_FIRST
        .captures_iter(text)
        .map(|c| (c.get(0).map_or(0, |m| m.start()), c, true))
        .chain(
            MONTH_FIRST
                .captures_iter(text)
                .map(|c| (c.get(0).map_or(0, |m| m.start()), c, false)),
        )
        .collect();
    candidates.sort_by_key(|(start, _, _)| *start);

    candidates.into_iter().find_map(|(_, caps, day_first)| {
        let (day, month, year) = if day_first {
            (&caps[1], &caps[2], &caps[3])
        } else {
            (&caps[2], &caps[1], &caps[3])
        };
        let date = NaiveDate::from_ymd_opt(
            year.parse().ok()?,
            month_number(month)?,
            day.parse().ok()?,
        )?;
        if normalize {
            Some(date.format("%-d %b %Y").to_string())
        } else {
            Some(caps[0].to_string())
        }
    })
}

/// 1-based month number for a full or abbreviated English month name.
pub fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let n = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

/// Digits following the first `Matchweek`, `Jornada` or `Round` in `text`.
pub fn find_round(text: &str) -> Option<String> {
    ROUND.captures(text).map(|c| c[1].to_string())
}

/// Derive a match id from a page identifier.
///
/// Uses the token after `/match/view/` when present, otherwise the last
/// non-empty path segment with any query or fragment removed.
pub fn match_id_from_identifier(identifier: &str) -> String {
    if let Some(caps) = MATCH_VIEW.captures(identifier) {
        return caps[1].to_string();
    }
    let path = identifier
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element, whitespace-collapsed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// The whole document's text, one space between text nodes, skipping
/// script and style contents.
///
/// Text nodes are joined with a separator so that adjacent widgets
/// (`Primera División` + `25 October 2025`) do not run together.
pub fn flatten_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element())
            .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript" | "template"));
        if !hidden {
            let t = text.trim();
            if !t.is_empty() {
                parts.push(t);
            }
        }
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
