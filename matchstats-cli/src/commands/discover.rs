use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use matchstats_lib::Settings;
use matchstats_lib::identifiers::write_identifiers;
use matchstats_scraper::discover_matches;

use super::{build_extractor, page_timeout, runtime};
use crate::cli_types::SessionArgs;
use crate::error::CliError;
use crate::provider::AnyProvider;

pub(crate) fn run_discover(
    settings: &Settings,
    listing_url: Option<String>,
    output: &Path,
    session: &SessionArgs,
) -> Result<(), CliError> {
    let rt = runtime()?;
    rt.block_on(discover_to_file(settings, listing_url, output, session))?;
    Ok(())
}

/// Collect the listing's match links into `output`. Returns how many were found.
pub(crate) async fn discover_to_file(
    settings: &Settings,
    listing_url: Option<String>,
    output: &Path,
    session: &SessionArgs,
) -> Result<usize, CliError> {
    let listing_url = listing_url.unwrap_or_else(|| settings.listing_url.clone());
    let provider = AnyProvider::from_args(session, settings, build_extractor(settings)?)?;

    log::info!(
        "Discovering matches on {}",
        listing_url.if_supports_color(Stdout, |t| t.cyan()),
    );
    let identifiers =
        discover_matches(&provider, &listing_url, page_timeout(session, settings)).await?;

    if identifiers.is_empty() {
        log::warn!(
            "  {} No match links found on the listing page",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    write_identifiers(output, &identifiers)?;
    log::info!(
        "  {} {} identifiers written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        identifiers.len(),
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(identifiers.len())
}
