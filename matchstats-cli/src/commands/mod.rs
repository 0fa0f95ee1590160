pub(crate) mod config;
pub(crate) mod discover;
pub(crate) mod extract;
pub(crate) mod run;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use matchstats_extract::{ExtractOptions, Extractor};
use matchstats_lib::Settings;
use matchstats_lib::settings::settings_path;
use tokio::time::Duration;

use crate::cli_types::SessionArgs;
use crate::error::CliError;

/// Settings from `--config` or the default location.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);
    Settings::load_from(&path).map_err(|e| CliError::config(e.to_string()))
}

pub(crate) fn build_extractor(settings: &Settings) -> Result<Arc<Extractor>, CliError> {
    let options = ExtractOptions {
        normalize_dates: settings.normalize_dates,
    };
    Extractor::new(&settings.layout, options)
        .map(Arc::new)
        .map_err(|e| CliError::config(format!("page layout: {}", e)))
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

pub(crate) fn page_timeout(args: &SessionArgs, settings: &Settings) -> Duration {
    Duration::from_secs(args.timeout.unwrap_or(settings.page_timeout_secs))
}

/// `<dir>/<stem>.<suffix>.csv` next to `output`.
pub(crate) fn sibling_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "player_stats".to_string());
    output.with_file_name(format!("{}.{}.csv", stem, suffix))
}
