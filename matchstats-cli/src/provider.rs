//! The session provider picked on the command line.

use std::sync::Arc;

use matchstats_extract::Extractor;
use matchstats_lib::Settings;
#[cfg(feature = "browser")]
use matchstats_scraper::BrowserProvider;
use matchstats_scraper::{
    HttpProvider, PageSession, ScrapeError, SessionProvider, SnapshotProvider,
};
use tokio::time::Duration;

use crate::cli_types::{ProviderKind, SessionArgs};
use crate::error::CliError;

pub(crate) enum AnyProvider {
    Http(HttpProvider),
    Snapshot(SnapshotProvider),
    #[cfg(feature = "browser")]
    Browser(BrowserProvider),
}

pub(crate) enum AnySession {
    Http(<HttpProvider as SessionProvider>::Session),
    Snapshot(<SnapshotProvider as SessionProvider>::Session),
    #[cfg(feature = "browser")]
    Browser(<BrowserProvider as SessionProvider>::Session),
}

fn default_kind() -> ProviderKind {
    if cfg!(feature = "browser") {
        ProviderKind::Browser
    } else {
        ProviderKind::Http
    }
}

impl AnyProvider {
    pub(crate) fn from_args(
        args: &SessionArgs,
        settings: &Settings,
        extractor: Arc<Extractor>,
    ) -> Result<Self, CliError> {
        let poll_interval = Duration::from_millis(settings.poll_interval_ms);
        match args.provider.unwrap_or_else(default_kind) {
            ProviderKind::Http => Ok(Self::Http(HttpProvider::new(
                settings.base_url.as_str(),
                settings.user_agent.as_str(),
                poll_interval,
                extractor,
            ))),
            ProviderKind::Snapshot => {
                let dir = args.snapshot_dir.clone().ok_or_else(|| {
                    CliError::config("--provider snapshot needs --snapshot-dir")
                })?;
                Ok(Self::Snapshot(SnapshotProvider::new(dir)))
            }
            #[cfg(feature = "browser")]
            ProviderKind::Browser => Ok(Self::Browser(BrowserProvider::new(
                settings.base_url.as_str(),
                settings.user_agent.as_str(),
                poll_interval,
                extractor,
            ))),
            #[cfg(not(feature = "browser"))]
            ProviderKind::Browser => Err(CliError::config(
                "this build has no browser support (rebuild with --features browser)",
            )),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Snapshot(_) => "snapshot",
            #[cfg(feature = "browser")]
            Self::Browser(_) => "browser",
        }
    }
}

impl SessionProvider for AnyProvider {
    type Session = AnySession;

    async fn acquire(&self, worker: usize) -> Result<AnySession, ScrapeError> {
        match self {
            Self::Http(p) => p.acquire(worker).await.map(AnySession::Http),
            Self::Snapshot(p) => p.acquire(worker).await.map(AnySession::Snapshot),
            #[cfg(feature = "browser")]
            Self::Browser(p) => p.acquire(worker).await.map(AnySession::Browser),
        }
    }

    fn address(&self, identifier: &str) -> String {
        match self {
            Self::Http(p) => p.address(identifier),
            Self::Snapshot(p) => p.address(identifier),
            #[cfg(feature = "browser")]
            Self::Browser(p) => p.address(identifier),
        }
    }
}

impl PageSession for AnySession {
    async fn open(&mut self, address: &str) -> Result<String, ScrapeError> {
        match self {
            Self::Http(s) => s.open(address).await,
            Self::Snapshot(s) => s.open(address).await,
            #[cfg(feature = "browser")]
            Self::Browser(s) => s.open(address).await,
        }
    }

    async fn listing(&mut self, address: &str) -> Result<String, ScrapeError> {
        match self {
            Self::Http(s) => s.listing(address).await,
            Self::Snapshot(s) => s.listing(address).await,
            #[cfg(feature = "browser")]
            Self::Browser(s) => s.listing(address).await,
        }
    }

    async fn release(self) {
        match self {
            Self::Http(s) => s.release().await,
            Self::Snapshot(s) => s.release().await,
            #[cfg(feature = "browser")]
            Self::Browser(s) => s.release().await,
        }
    }
}
