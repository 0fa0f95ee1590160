use std::path::Path;

use matchstats_lib::Settings;

use super::discover::discover_to_file;
use super::extract::{extract_identifiers, load_identifiers};
use super::runtime;
use crate::cli_types::{RunArgs, SessionArgs};
use crate::error::CliError;

/// Discover into `identifiers`, then extract everything listed there.
pub(crate) fn run_all(
    settings: &Settings,
    listing_url: Option<String>,
    identifiers: &Path,
    run: &RunArgs,
    session: &SessionArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let rt = runtime()?;
    rt.block_on(async {
        discover_to_file(settings, listing_url, identifiers, session).await?;
        log::info!("");
        let ids = load_identifiers(identifiers)?;
        extract_identifiers(settings, ids, run, session, quiet).await
    })
}
