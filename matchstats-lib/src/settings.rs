//! Run settings stored in `~/.config/matchstats/settings.toml`.
//!
//! Every field has a default, so a missing file (or a file naming only a
//! few fields) is fine. Command-line flags override whatever is loaded here.

use std::path::{Path, PathBuf};

use matchstats_extract::PageLayout;
use serde::{Deserialize, Serialize};

use crate::error::OutputError;

/// Canonical path to the settings file: `~/.config/matchstats/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("matchstats").join("settings.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Concurrent workers (one page session each)
    pub workers: usize,
    /// Upper bound on waiting for a page to become ready
    pub page_timeout_secs: u64,
    /// Interval between ready-marker checks while waiting
    pub poll_interval_ms: u64,
    /// Pause between consecutive items of one worker
    pub item_delay_ms: u64,
    /// Write a progress CSV every N completed items (0 = never)
    pub checkpoint_every: usize,
    /// Prefix for bare match identifiers
    pub base_url: String,
    /// Competition page scanned by `discover`
    pub listing_url: String,
    pub user_agent: String,
    /// Render dates as `D Mon YYYY`
    pub normalize_dates: bool,
    /// Start CSV output with a UTF-8 byte order mark
    pub excel_bom: bool,
    pub layout: PageLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: 4,
            page_timeout_secs: 30,
            poll_interval_ms: 500,
            item_delay_ms: 2000,
            checkpoint_every: 10,
            base_url: "https://optaplayerstats.statsperform.com/en_GB/soccer".to_string(),
            listing_url: "https://optaplayerstats.statsperform.com/en_GB/soccer/primera-division-2025-2026/80zg2vxmhy3t5g94u9gn7nb9w/opta-player-stats".to_string(),
            user_agent: concat!("matchstats/", env!("CARGO_PKG_VERSION")).to_string(),
            normalize_dates: true,
            excel_bom: false,
            layout: PageLayout::default(),
        }
    }
}

impl Settings {
    /// Load from the canonical path; a missing file gives the defaults.
    pub fn load() -> Result<Self, OutputError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, OutputError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents)
            .map_err(|e| OutputError::settings(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> Result<Self, OutputError> {
        let settings: Self =
            toml::from_str(contents).map_err(|e| OutputError::settings(e.to_string()))?;
        if settings.workers == 0 {
            return Err(OutputError::settings("workers must be at least 1"));
        }
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, OutputError> {
        toml::to_string_pretty(self).map_err(|e| OutputError::settings(e.to_string()))
    }

    /// Write atomically (temp file + rename), creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), OutputError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = self.to_toml()?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
