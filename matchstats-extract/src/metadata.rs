//! Best-effort lookups for match-level facts.
//!
//! Each function returns `None` (or fewer names) when the page does not
//! carry the fact; absence is never an error.

use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::text::{collapse_whitespace, element_text};

/// Referee from a `<dt>Referee</dt><dd>Name</dd>` pair.
///
/// `labels` are compared case-insensitively, ignoring a trailing colon.
/// The value is the first following `dd` sibling of the label.
pub fn referee_from_labels(
    document: &Html,
    label_selector: &Selector,
    labels: &[String],
) -> Option<String> {
    document
        .select(label_selector)
        .filter(|label| {
            let text = element_text(label);
            let text = text.trim_end_matches(':').trim().to_lowercase();
            labels.iter().any(|l| l.to_lowercase() == text)
        })
        .find_map(|label| {
            label
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "dd")
                .map(|dd| element_text(&dd))
                .filter(|value| !value.is_empty())
        })
}

/// Referee from an inline `Referee: Name` text node.
pub fn referee_from_text(document: &Html, inline: &Regex) -> Option<String> {
    document.root_element().descendants().find_map(|node| {
        let Node::Text(text) = node.value() else {
            return None;
        };
        inline
            .captures(text)
            .map(|caps| collapse_whitespace(&caps[1]))
            .filter(|name| !name.is_empty())
    })
}

/// Build the `Referee: Name` pattern for the configured labels.
pub fn inline_label_pattern(labels: &[String]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = labels.iter().map(|l| regex::escape(l)).collect();
    Regex::new(&format!(
        r"(?i)^\s*(?:{})\s*:\s*(\S.*?)\s*$",
        alternatives.join("|")
    ))
}

/// Team names in document order, at most two, first is home.
///
/// Elements matching `team_selector` are tried first. If they give fewer
/// than two distinct names, image alt texts are scanned for club-like names:
/// longer than two characters, not containing any `alt_exclude` fragment,
/// and containing at least one `club_tokens` fragment (lowercase).
///
/// Home/away is presentation order only. A page that lists the away club
/// first produces swapped teams.
pub fn team_names(
    document: &Html,
    team_selector: &Selector,
    img_selector: &Selector,
    club_tokens: &[String],
    alt_exclude: &[String],
) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(2);

    for element in document.select(team_selector) {
        let name = element_text(&element);
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
        if names.len() == 2 {
            return names;
        }
    }

    for img in document.select(img_selector) {
        let Some(alt) = img.value().attr("alt") else {
            continue;
        };
        let alt = collapse_whitespace(alt);
        if looks_like_club(&alt, club_tokens, alt_exclude) && !names.contains(&alt) {
            names.push(alt);
        }
        if names.len() == 2 {
            break;
        }
    }

    names
}

fn looks_like_club(alt: &str, club_tokens: &[String], alt_exclude: &[String]) -> bool {
    if alt.chars().count() <= 2 {
        return false;
    }
    let lower = alt.to_lowercase();
    if alt_exclude
        .iter()
        .any(|ex| lower.contains(&ex.to_lowercase()))
    {
        return false;
    }
    club_tokens
        .iter()
        .any(|token| lower.contains(&token.to_lowercase()))
}

#[cfg(test)]
#[path = "tests/metadata_tests.rs"]
mod tests;
