use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::time::Duration;

use matchstats_core::WorkItem;
use matchstats_lib::Settings;
use matchstats_lib::async_util::run_with_events;
use matchstats_lib::identifiers::read_identifiers;
use matchstats_lib::{WriteOptions, write_records_to_path};
use matchstats_scraper::{BatchControl, BatchOptions, BatchResult, run_batch};

use super::{build_extractor, page_timeout, runtime, sibling_path};
use crate::cli_types::{RunArgs, SessionArgs};
use crate::error::CliError;
use crate::provider::AnyProvider;
use crate::spinner::BatchDisplay;

/// Read an identifier list, or fail with an input error.
pub(crate) fn load_identifiers(path: &Path) -> Result<Vec<String>, CliError> {
    read_identifiers(path).map_err(|e| CliError::input(format!("{}: {}", path.display(), e)))
}

/// Extract every page named in `input`.
pub(crate) fn run_extract(
    settings: &Settings,
    input: &Path,
    run: &RunArgs,
    session: &SessionArgs,
    quiet: bool,
) -> Result<(), CliError> {
    let identifiers = load_identifiers(input)?;
    log::info!(
        "Read {} identifiers from {}",
        identifiers.len(),
        input.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    let rt = runtime()?;
    rt.block_on(extract_identifiers(settings, identifiers, run, session, quiet))
}

pub(crate) async fn extract_identifiers(
    settings: &Settings,
    mut identifiers: Vec<String>,
    run: &RunArgs,
    session: &SessionArgs,
    quiet: bool,
) -> Result<(), CliError> {
    if let Some(limit) = run.limit {
        identifiers.truncate(limit);
    }
    let items = WorkItem::numbered(identifiers);

    let workers = run.workers.unwrap_or(settings.workers);
    if workers == 0 {
        return Err(CliError::config("--workers must be at least 1"));
    }

    let extractor = build_extractor(settings)?;
    let provider = AnyProvider::from_args(session, settings, extractor.clone())?;
    let provider_name = provider.name();

    let write_options = WriteOptions {
        excel_bom: run.excel_bom || settings.excel_bom,
    };
    let checkpoint_every = if run.no_checkpoint {
        0
    } else {
        settings.checkpoint_every
    };
    let options = BatchOptions {
        workers,
        page_timeout: page_timeout(session, settings),
        item_delay: Duration::from_millis(run.delay.unwrap_or(settings.item_delay_ms)),
        checkpoint_every,
        checkpoint_path: (checkpoint_every > 0).then(|| sibling_path(&run.output, "progress")),
        write_options,
    };
    let failures_path = run
        .failures
        .clone()
        .unwrap_or_else(|| sibling_path(&run.output, "failures"));

    log::info!(
        "Extracting {} pages with {} {} workers",
        items.len(),
        workers,
        provider_name,
    );
    log::info!(
        "  {}",
        format!(
            "Page timeout: {}s, delay between pages: {}ms",
            options.page_timeout.as_secs(),
            options.item_delay.as_millis()
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );

    let control = BatchControl::new();
    let interrupt = {
        let control = control.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!(
                    "  {} Interrupted: finishing pages in progress, skipping the rest",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                );
                control.cancel();
            }
        })
    };

    let mut display = BatchDisplay::new(quiet);
    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let result = run_with_events(
        run_batch(
            Arc::new(provider),
            extractor,
            items,
            &options,
            &control,
            event_tx,
        ),
        event_rx,
        |e| display.handle(e),
    )
    .await;
    display.finish();
    interrupt.abort();

    let rows = write_records_to_path(&run.output, &result.records, write_options)?;
    result.failures.append_to_file(&failures_path)?;

    if let Some(checkpoint) = &options.checkpoint_path {
        match std::fs::remove_file(checkpoint) {
            Ok(()) => log::debug!("Removed checkpoint {}", checkpoint.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", checkpoint.display(), e),
        }
    }

    print_summary(&result, rows, &run.output, &failures_path, control.is_cancelled());
    Ok(())
}

fn print_summary(
    result: &BatchResult,
    rows: usize,
    output: &Path,
    failures_path: &Path,
    cancelled: bool,
) {
    let summary = result.failures.summary();

    log::info!("");
    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} of {} pages extracted, {} records written",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        result.succeeded,
        result.total,
        rows,
    );
    if summary.total > 0 {
        log::warn!(
            "  {} {} pages failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.total,
        );
        for (kind, count) in &summary.by_kind {
            log::warn!("      {}: {}", kind, count);
        }
    }
    if cancelled {
        log::warn!(
            "  {} Run was interrupted; unstarted pages are logged as cancelled",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    log::info!(
        "  Output:   {}",
        output.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!(
        "  Failures: {}",
        failures_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
}
