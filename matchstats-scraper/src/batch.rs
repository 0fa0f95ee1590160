//! The batch orchestrator.
//!
//! Work items are split into contiguous shards, one per worker. Each shard
//! runs as its own task holding a single page session for its whole
//! lifetime. Per-item outcomes stream back to the orchestrator, which merges
//! them into the run's [`BatchResult`] in completion order.

use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::FutureExt;
use matchstats_core::{ErrorKind, FailureRecord, PlayerRecord, WorkItem, partition};
use matchstats_extract::Extractor;
use matchstats_lib::{ShardPool, WriteOptions, write_records_to_path};
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::error::ScrapeError;
use crate::log::FailureLog;
use crate::session::{PageSession, SessionProvider};

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Requested worker count; fewer run when there are fewer items
    pub workers: usize,
    /// Bound on acquiring a session and on each page becoming ready
    pub page_timeout: Duration,
    /// Pause between consecutive items of one shard
    pub item_delay: Duration,
    /// Write a checkpoint every N completed items (0 = never)
    pub checkpoint_every: usize,
    /// Where checkpoints go; no checkpoints without a path
    pub checkpoint_path: Option<PathBuf>,
    pub write_options: WriteOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: 4,
            page_timeout: Duration::from_secs(30),
            item_delay: Duration::ZERO,
            checkpoint_every: 0,
            checkpoint_path: None,
            write_options: WriteOptions::default(),
        }
    }
}

/// Shared completed-item counter, readable while a run is in flight.
#[derive(Debug, Clone, Default)]
pub struct BatchProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl BatchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Completed share in `0.0..=1.0`; an empty run counts as done.
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 1.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    fn reset(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
        self.completed.store(0, Ordering::SeqCst);
    }

    /// Count one finished item and return the new completed count.
    fn finish_one(&self) -> usize {
        self.completed.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Handles a caller keeps to observe and stop a run.
#[derive(Debug, Clone, Default)]
pub struct BatchControl {
    pub progress: BatchProgress,
    pub cancel: Arc<AtomicBool>,
}

impl BatchControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop issuing new navigations. Items already loading finish normally.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Items have been partitioned; `workers` shards will run.
    Started { total: usize, workers: usize },
    /// A shard holds its session and starts on its items.
    ShardStarted { shard: usize, items: usize },
    /// A shard could not get a session; all its items failed.
    ShardFailed { shard: usize, message: String },
    /// A worker is loading a page.
    ItemStarted {
        shard: usize,
        sequence_number: usize,
        page_identifier: String,
    },
    /// A page was extracted.
    ItemCompleted {
        sequence_number: usize,
        records: usize,
        completed: usize,
        total: usize,
    },
    /// A page produced a failure record.
    ItemFailed {
        failure: FailureRecord,
        completed: usize,
        total: usize,
    },
    /// The records gathered so far were written to the checkpoint file.
    Checkpoint { path: PathBuf, rows: usize },
    /// All items accounted for.
    Done,
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Player records, ordered by sequence number (page order within a page)
    pub records: Vec<PlayerRecord>,
    pub failures: FailureLog,
    /// Items that were extracted (possibly with zero records)
    pub succeeded: usize,
    pub total: usize,
    /// Final value of the shared counter; equals `total`
    pub completed: usize,
}

impl BatchResult {
    pub fn failed(&self) -> usize {
        self.failures.entries().len()
    }
}

/// Outcome of one work item, sent from a shard to the orchestrator.
enum ItemOutcome {
    Extracted {
        item: WorkItem,
        records: Vec<PlayerRecord>,
    },
    Failed(FailureRecord),
}

impl ItemOutcome {
    fn sequence_number(&self) -> usize {
        match self {
            Self::Extracted { item, .. } => item.sequence_number,
            Self::Failed(f) => f.sequence_number,
        }
    }
}

/// State shared by every shard task of one run.
struct ShardContext<P> {
    provider: Arc<P>,
    extractor: Arc<Extractor>,
    options: BatchOptions,
    control: BatchControl,
    events: mpsc::UnboundedSender<BatchEvent>,
}

/// Run every item through a session and the extractor.
///
/// Item failures never stop the run: each becomes a [`FailureRecord`] and the
/// shared counter still advances, so at return `completed == total` and
/// `succeeded + failed == total`. A shard that cannot acquire a session fails
/// all of its items with `session_acquisition`. After cancellation, items not
/// yet started fail with `cancelled`.
pub async fn run_batch<P: SessionProvider>(
    provider: Arc<P>,
    extractor: Arc<Extractor>,
    items: Vec<WorkItem>,
    options: &BatchOptions,
    control: &BatchControl,
    events: mpsc::UnboundedSender<BatchEvent>,
) -> BatchResult {
    let total = items.len();
    control.progress.reset(total);

    let shards = partition(&items, options.workers);
    let _ = events.send(BatchEvent::Started {
        total,
        workers: shards.len(),
    });
    log::info!("Starting batch of {} items on {} workers", total, shards.len());

    let ctx = Arc::new(ShardContext {
        provider,
        extractor,
        options: options.clone(),
        control: control.clone(),
        events: events.clone(),
    });

    let mut pool = ShardPool::start(shards, move |index, shard, tx| {
        run_shard(ctx.clone(), index, shard, tx)
    });

    let mut result = BatchResult {
        total,
        ..BatchResult::default()
    };
    let mut seen: HashSet<usize> = HashSet::with_capacity(total);

    while let Some(outcome) = pool.recv().await {
        seen.insert(outcome.sequence_number());
        match outcome {
            ItemOutcome::Extracted { records, .. } => {
                result.succeeded += 1;
                result.records.extend(records);
            }
            ItemOutcome::Failed(failure) => result.failures.add(failure),
        }
        maybe_checkpoint(&result, seen.len(), options, &events).await;
    }

    // A shard task that panicked outside extraction leaves items unreported
    let panicked = pool.join().await;
    if !panicked.is_empty() {
        for item in items.iter().filter(|i| !seen.contains(&i.sequence_number)) {
            let failure = FailureRecord::new(item, ErrorKind::Internal, "worker stopped unexpectedly");
            let completed = control.progress.finish_one();
            let _ = events.send(BatchEvent::ItemFailed {
                failure: failure.clone(),
                completed,
                total,
            });
            result.failures.add(failure);
        }
    }

    result.records.sort_by_key(|r| r.sequence_number().unwrap_or(usize::MAX));
    result.completed = control.progress.completed();

    log::info!(
        "Batch finished: {} succeeded, {} failed, {} records",
        result.succeeded,
        result.failed(),
        result.records.len()
    );
    let _ = events.send(BatchEvent::Done);
    result
}

/// Rewrite the checkpoint file every `checkpoint_every` outcomes.
///
/// The write runs on the blocking pool; shards keep working meanwhile and
/// their outcomes queue in the channel.
async fn maybe_checkpoint(
    result: &BatchResult,
    received: usize,
    options: &BatchOptions,
    events: &mpsc::UnboundedSender<BatchEvent>,
) {
    let Some(path) = &options.checkpoint_path else {
        return;
    };
    if options.checkpoint_every == 0 || received == 0 || received % options.checkpoint_every != 0 {
        return;
    }
    let records = result.records.clone();
    let target = path.clone();
    let write_options = options.write_options;
    let written = tokio::task::spawn_blocking(move || {
        write_records_to_path(&target, &records, write_options)
    })
    .await;
    let written = match written {
        Ok(written) => written,
        Err(e) => {
            log::warn!("Checkpoint task for {} failed: {}", path.display(), e);
            return;
        }
    };
    match written {
        Ok(rows) => {
            log::debug!("Checkpoint: {} rows to {}", rows, path.display());
            let _ = events.send(BatchEvent::Checkpoint {
                path: path.clone(),
                rows,
            });
        }
        Err(e) => log::warn!("Checkpoint to {} failed: {}", path.display(), e),
    }
}

async fn run_shard<P: SessionProvider>(
    ctx: Arc<ShardContext<P>>,
    index: usize,
    shard: Vec<WorkItem>,
    tx: mpsc::UnboundedSender<ItemOutcome>,
) {
    if ctx.control.is_cancelled() {
        fail_all(&ctx, &shard, ErrorKind::Cancelled, "run cancelled", &tx);
        return;
    }

    let acquired = tokio::time::timeout(ctx.options.page_timeout, ctx.provider.acquire(index)).await;
    let mut session = match acquired {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
            shard_failed(&ctx, index, &shard, &e.to_string(), &tx);
            return;
        }
        Err(_) => {
            let message = format!(
                "no session after {}s",
                ctx.options.page_timeout.as_secs()
            );
            shard_failed(&ctx, index, &shard, &message, &tx);
            return;
        }
    };

    let _ = ctx.events.send(BatchEvent::ShardStarted {
        shard: index,
        items: shard.len(),
    });

    for (position, item) in shard.iter().enumerate() {
        if position > 0 && !ctx.options.item_delay.is_zero() {
            tokio::time::sleep(ctx.options.item_delay).await;
        }
        if ctx.control.is_cancelled() {
            log::info!(
                "Shard {}: cancelled with {} items left",
                index,
                shard.len() - position
            );
            fail_all(&ctx, &shard[position..], ErrorKind::Cancelled, "run cancelled", &tx);
            break;
        }

        let _ = ctx.events.send(BatchEvent::ItemStarted {
            shard: index,
            sequence_number: item.sequence_number,
            page_identifier: item.page_identifier.clone(),
        });
        let attempt = AssertUnwindSafe(process_item(&ctx, &mut session, item))
            .catch_unwind()
            .await;
        match attempt {
            Ok(outcome) => report(&ctx, outcome, &tx),
            Err(payload) => {
                // Stop using the session but still release it
                let message = format!("session panicked: {}", panic_message(payload.as_ref()));
                log::warn!("Shard {}: {}", index, message);
                fail_all(&ctx, &shard[position..], ErrorKind::Internal, &message, &tx);
                break;
            }
        }
    }

    session.release().await;
}

async fn process_item<P: SessionProvider>(
    ctx: &ShardContext<P>,
    session: &mut P::Session,
    item: &WorkItem,
) -> ItemOutcome {
    let address = ctx.provider.address(&item.page_identifier);
    log::debug!("[{}] Opening {}", item.sequence_number, address);

    let opened = tokio::time::timeout(ctx.options.page_timeout, session.open(&address)).await;
    let html = match opened {
        Ok(Ok(html)) => html,
        Ok(Err(e)) => return ItemOutcome::Failed(FailureRecord::new(item, e.kind(), e.to_string())),
        Err(_) => {
            let e = ScrapeError::PageTimeout {
                address,
                secs: ctx.options.page_timeout.as_secs(),
            };
            return ItemOutcome::Failed(FailureRecord::new(item, e.kind(), e.to_string()));
        }
    };

    let extracted = std::panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.extractor
            .extract(&html, &item.page_identifier, item.sequence_number)
    }));
    match extracted {
        Ok(Ok(page)) => ItemOutcome::Extracted {
            item: item.clone(),
            records: page.records,
        },
        Ok(Err(e)) => {
            let e = ScrapeError::from(e);
            ItemOutcome::Failed(FailureRecord::new(item, e.kind(), e.to_string()))
        }
        Err(payload) => ItemOutcome::Failed(FailureRecord::new(
            item,
            ErrorKind::Internal,
            format!("extraction panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

/// Count an outcome, announce it and hand it to the orchestrator.
fn report<P>(ctx: &ShardContext<P>, outcome: ItemOutcome, tx: &mpsc::UnboundedSender<ItemOutcome>) {
    let completed = ctx.control.progress.finish_one();
    let total = ctx.control.progress.total();
    let event = match &outcome {
        ItemOutcome::Extracted { item, records } => BatchEvent::ItemCompleted {
            sequence_number: item.sequence_number,
            records: records.len(),
            completed,
            total,
        },
        ItemOutcome::Failed(failure) => {
            log::warn!(
                "[{}] {} failed ({}): {}",
                failure.sequence_number,
                failure.page_identifier,
                failure.kind,
                failure.message
            );
            BatchEvent::ItemFailed {
                failure: failure.clone(),
                completed,
                total,
            }
        }
    };
    let _ = ctx.events.send(event);
    let _ = tx.send(outcome);
}

fn fail_all<P>(
    ctx: &ShardContext<P>,
    items: &[WorkItem],
    kind: ErrorKind,
    message: &str,
    tx: &mpsc::UnboundedSender<ItemOutcome>,
) {
    for item in items {
        report(ctx, ItemOutcome::Failed(FailureRecord::new(item, kind, message)), tx);
    }
}

fn shard_failed<P>(
    ctx: &ShardContext<P>,
    index: usize,
    shard: &[WorkItem],
    message: &str,
    tx: &mpsc::UnboundedSender<ItemOutcome>,
) {
    log::warn!("Shard {} failed to acquire a session: {}", index, message);
    let _ = ctx.events.send(BatchEvent::ShardFailed {
        shard: index,
        message: message.to_string(),
    });
    fail_all(ctx, shard, ErrorKind::SessionAcquisition, message, tx);
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
