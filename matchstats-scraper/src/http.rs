//! Sessions over plain HTTP.
//!
//! Works for servers that deliver the statistics widgets pre-rendered. A
//! page that is still missing its ready markers is fetched again every
//! poll interval.

use std::sync::Arc;

use matchstats_extract::Extractor;
use tokio::time::Duration;

use crate::error::ScrapeError;
use crate::session::{PageSession, SessionProvider, resolve_address};

/// Per-request network timeout, independent of the page-ready bound.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpProvider {
    base_url: String,
    user_agent: String,
    poll_interval: Duration,
    extractor: Arc<Extractor>,
}

impl HttpProvider {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        poll_interval: Duration,
        extractor: Arc<Extractor>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            poll_interval,
            extractor,
        }
    }
}

pub struct HttpSession {
    client: reqwest::Client,
    poll_interval: Duration,
    extractor: Arc<Extractor>,
}

impl SessionProvider for HttpProvider {
    type Session = HttpSession;

    async fn acquire(&self, worker: usize) -> Result<HttpSession, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ScrapeError::session(format!("worker {}: {}", worker, e)))?;
        Ok(HttpSession {
            client,
            poll_interval: self.poll_interval,
            extractor: self.extractor.clone(),
        })
    }

    fn address(&self, identifier: &str) -> String {
        resolve_address(&self.base_url, identifier)
    }
}

impl HttpSession {
    async fn fetch(&self, address: &str) -> Result<String, ScrapeError> {
        let resp = self.client.get(address).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::navigation(format!(
                "HTTP {} for {}",
                status.as_u16(),
                address
            )));
        }
        Ok(resp.text().await?)
    }
}

impl PageSession for HttpSession {
    async fn open(&mut self, address: &str) -> Result<String, ScrapeError> {
        let mut attempts: u32 = 0;
        loop {
            let html = self.fetch(address).await?;
            attempts += 1;
            if self.extractor.is_ready(&html) {
                log::debug!("{} ready after {} fetches", address, attempts);
                return Ok(html);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn listing(&mut self, address: &str) -> Result<String, ScrapeError> {
        self.fetch(address).await
    }

    async fn release(self) {}
}
