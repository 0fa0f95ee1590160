//! Listing-page discovery through a page session.

use matchstats_extract::discover_links;
use tokio::time::Duration;

use crate::error::ScrapeError;
use crate::session::{PageSession, SessionProvider};

/// Open `listing_url` in a fresh session and collect its match links.
///
/// The session is released whether or not the listing loaded.
pub async fn discover_matches<P: SessionProvider>(
    provider: &P,
    listing_url: &str,
    timeout: Duration,
) -> Result<Vec<String>, ScrapeError> {
    let mut session = provider.acquire(0).await?;
    let loaded = tokio::time::timeout(timeout, session.listing(listing_url)).await;
    session.release().await;

    let html = loaded.map_err(|_| ScrapeError::PageTimeout {
        address: listing_url.to_string(),
        secs: timeout.as_secs(),
    })??;

    let links = discover_links(&html, listing_url);
    log::info!("Found {} match links on {}", links.len(), listing_url);
    Ok(links)
}
