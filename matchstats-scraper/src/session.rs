//! Page sessions: the seam between the orchestrator and whatever renders
//! pages (a browser, plain HTTP, or files on disk).

use std::future::Future;

use crate::error::ScrapeError;

/// One worker's exclusive handle on a page renderer.
///
/// A session is acquired once per shard and reused for every item of that
/// shard.
pub trait PageSession: Send {
    /// Navigate to `address` and return the rendered HTML once the page shows
    /// its ready markers.
    ///
    /// Implementations may wait indefinitely for the markers; the caller
    /// bounds the wait and drops the future on timeout.
    fn open(&mut self, address: &str) -> impl Future<Output = Result<String, ScrapeError>> + Send;

    /// Load a competition listing page, with no ready-marker wait.
    fn listing(&mut self, address: &str)
    -> impl Future<Output = Result<String, ScrapeError>> + Send;

    /// Tear the session down. Called exactly once, whatever happened to the
    /// shard's items.
    fn release(self) -> impl Future<Output = ()> + Send;
}

/// Factory for per-worker sessions.
pub trait SessionProvider: Send + Sync + 'static {
    type Session: PageSession + 'static;

    /// Open a session for worker `worker` (0-based shard index).
    fn acquire(
        &self,
        worker: usize,
    ) -> impl Future<Output = Result<Self::Session, ScrapeError>> + Send;

    /// Turn a page identifier into something [`PageSession::open`] accepts.
    fn address(&self, identifier: &str) -> String;
}

/// Resolve a page identifier against a base URL.
///
/// Identifiers that already are URLs are returned unchanged; bare match ids
/// become `{base_url}/match/view/{id}`.
pub fn resolve_address(base_url: &str, identifier: &str) -> String {
    let identifier = identifier.trim();
    if identifier.starts_with("http://") || identifier.starts_with("https://") {
        identifier.to_string()
    } else {
        format!(
            "{}/match/view/{}",
            base_url.trim_end_matches('/'),
            identifier.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://optaplayerstats.statsperform.com/en_GB/soccer";

    #[test]
    fn urls_pass_through() {
        let url = "https://optaplayerstats.statsperform.com/en_GB/soccer/match/view/abc123";
        assert_eq!(resolve_address(BASE, url), url);
        assert_eq!(resolve_address(BASE, "http://localhost:8080/x"), "http://localhost:8080/x");
    }

    #[test]
    fn bare_ids_are_joined_to_the_base() {
        assert_eq!(
            resolve_address(&format!("{BASE}/"), " abc123 "),
            format!("{BASE}/match/view/abc123")
        );
    }
}
