use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use matchstats_lib::Settings;
use matchstats_lib::settings::settings_path;

use crate::error::CliError;

fn resolve(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf).unwrap_or_else(settings_path)
}

/// Print the settings file location and the effective values.
pub(crate) fn run_config_show(path: Option<&Path>) -> Result<(), CliError> {
    let path = resolve(path);
    let settings = Settings::load_from(&path).map_err(|e| CliError::config(e.to_string()))?;

    log::info!(
        "{}",
        "matchstats settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let rendered = settings.to_toml()?;
    for line in rendered.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

pub(crate) fn run_config_path(path: Option<&Path>) {
    println!("{}", resolve(path).display());
}

/// Write the default settings, refusing to replace a file unless `force`.
pub(crate) fn run_config_init(path: Option<&Path>, force: bool) -> Result<(), CliError> {
    let path = resolve(path);
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Settings::default().save_to(&path)?;
    log::info!(
        "  {} Wrote default settings to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
