//! Headless Chrome sessions (cargo feature `browser`).
//!
//! Each worker launches its own browser with a single tab. Match pages render
//! their statistics client-side, so the tab's DOM is polled until the ready
//! markers appear.

use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use matchstats_extract::Extractor;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::error::ScrapeError;
use crate::session::{PageSession, SessionProvider, resolve_address};

/// How many times a listing page is scrolled to load lazy match links.
const LISTING_SCROLLS: u32 = 8;

pub struct BrowserProvider {
    base_url: String,
    user_agent: String,
    poll_interval: Duration,
    extractor: Arc<Extractor>,
}

impl BrowserProvider {
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

pub struct BrowserSession {
    worker: usize,
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    poll_interval: Duration,
    extractor: Arc<Extractor>,
}

impl SessionProvider for BrowserProvider {
    type Session = BrowserSession;

    async fn acquire(&self, worker: usize) -> Result<BrowserSession, ScrapeError> {
        let config = BrowserConfig::builder()
            .window_size(1920, 1080)
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg(format!("--user-agent={}", self.user_agent))
            .build()
            .map_err(|e| ScrapeError::session(format!("worker {}: {}", worker, e)))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::session(format!("worker {}: {}", worker, e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::trace!("Browser handler (worker {}): {}", worker, e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(ScrapeError::session(format!("worker {}: {}", worker, e)));
            }
        };

        log::debug!("Worker {} launched a browser", worker);
        Ok(BrowserSession {
            worker,
            browser,
            page,
            handler,
            poll_interval: self.poll_interval,
            extractor: self.extractor.clone(),
        })
    }

    fn address(&self, identifier: &str) -> String {
        resolve_address(&self.base_url, identifier)
    }
}

impl BrowserSession {
    async fn navigate(&self, address: &str) -> Result<(), ScrapeError> {
        self.page
            .goto(address)
            .await
            .map_err(|e| ScrapeError::navigation(format!("{}: {}", address, e)))?;
        Ok(())
    }

    async fn content(&self) -> Result<String, ScrapeError> {
        self.page
            .content()
            .await
            .map_err(|e| ScrapeError::navigation(e.to_string()))
    }
}

impl PageSession for BrowserSession {
    async fn open(&mut self, address: &str) -> Result<String, ScrapeError> {
        self.navigate(address).await?;
        loop {
            let html = self.content().await?;
            if self.extractor.is_ready(&html) {
                return Ok(html);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn listing(&mut self, address: &str) -> Result<String, ScrapeError> {
        self.navigate(address).await?;
        for _ in 0..LISTING_SCROLLS {
            if let Err(e) = self
                .page
                .evaluate("window.scrollTo(0, document.body.scrollHeight)")
                .await
            {
                log::debug!("Scrolling listing failed: {}", e);
                break;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        self.content().await
    }

    async fn release(mut self) {
        if let Err(e) = self.browser.close().await {
            log::warn!("Worker {}: closing browser failed: {}", self.worker, e);
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        log::debug!("Worker {} released its browser", self.worker);
    }
}
