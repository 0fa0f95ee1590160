//! Match link discovery on a competition listing page.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

static MATCH_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/match/view/[a-z0-9]+").expect("static pattern"));

/// Every distinct match-page link on a listing page, sorted.
///
/// Relative links are resolved against `listing_url`. If `listing_url`
/// cannot be parsed, links are kept as written.
pub fn discover_links(html: &str, listing_url: &str) -> Vec<String> {
    let base = Url::parse(listing_url).ok();
    let document = Html::parse_document(html);
    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let links: BTreeSet<String> = document
        .select(&anchor)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| MATCH_LINK.is_match(href))
        .map(|href| match &base {
            Some(base) => base
                .join(href)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| href.to_string()),
            None => href.to_string(),
        })
        .collect();

    links.into_iter().collect()
}
