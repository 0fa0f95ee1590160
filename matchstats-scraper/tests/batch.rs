use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use matchstats_core::{ErrorKind, WorkItem};
use matchstats_extract::Extractor;
use matchstats_scraper::{
    BatchControl, BatchEvent, BatchOptions, BatchResult, PageSession, ScrapeError,
    SessionProvider, run_batch,
};
use tokio::sync::mpsc;
use tokio::time::Duration;

#[derive(Clone)]
enum Behaviour {
    Page(String),
    Hang,
    Blocked,
    NavigationError,
    /// Serve the page, then cancel the run
    CancelAfter(String),
    Panic,
}

struct FakeProvider {
    pages: Arc<HashMap<String, Behaviour>>,
    fail_workers: HashSet<usize>,
    control: BatchControl,
    released: Arc<AtomicUsize>,
}

struct FakeSession {
    pages: Arc<HashMap<String, Behaviour>>,
    control: BatchControl,
    released: Arc<AtomicUsize>,
}

impl SessionProvider for FakeProvider {
    type Session = FakeSession;

    async fn acquire(&self, worker: usize) -> Result<FakeSession, ScrapeError> {
        if self.fail_workers.contains(&worker) {
            return Err(ScrapeError::session(format!("worker {worker}: chrome not found")));
        }
        Ok(FakeSession {
            pages: self.pages.clone(),
            control: self.control.clone(),
            released: self.released.clone(),
        })
    }

    fn address(&self, identifier: &str) -> String {
        format!("fake://{identifier}")
    }
}

impl PageSession for FakeSession {
    async fn open(&mut self, address: &str) -> Result<String, ScrapeError> {
        let id = address.trim_start_matches("fake://");
        match self.pages.get(id).cloned() {
            Some(Behaviour::Page(html)) => Ok(html),
            Some(Behaviour::Hang) => std::future::pending().await,
            Some(Behaviour::Blocked) => Ok("<html><body><p>Access denied</p></body></html>".into()),
            Some(Behaviour::NavigationError) | None => {
                Err(ScrapeError::navigation(format!("{address}: connection reset")))
            }
            Some(Behaviour::CancelAfter(html)) => {
                self.control.cancel();
                Ok(html)
            }
            Some(Behaviour::Panic) => panic!("renderer crashed on {id}"),
        }
    }

    async fn listing(&mut self, _address: &str) -> Result<String, ScrapeError> {
        Ok(String::new())
    }

    async fn release(self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn match_html(id: &str) -> String {
    let table = |player: &str| {
        format!(
            "<table><thead><tr><th>Player</th><th>Goals</th><th>Shots</th></tr></thead>\
             <tbody><tr><th class='Opta-Player'>{player}</th>\
             <td class='Opta-Stat'>0</td><td class='Opta-Stat'>2</td></tr></tbody></table>"
        )
    };
    format!(
        "<html><body><div class='Opta-MatchHeader'>\
         <span class='Opta-TeamName'>Home {id} CF</span><span class='Opta-TeamName'>Away {id} FC</span>\
         <span>Matchweek 3</span><span>15 August 2025</span></div>{}{}</body></html>",
        table(&format!("Keeper {id}")),
        table(&format!("Striker {id}")),
    )
}

struct Harness {
    items: Vec<WorkItem>,
    pages: HashMap<String, Behaviour>,
    fail_workers: HashSet<usize>,
    options: BatchOptions,
    control: BatchControl,
}

impl Harness {
    fn new(count: usize, workers: usize) -> Self {
        let ids: Vec<String> = (1..=count).map(|i| format!("m{i}")).collect();
        let pages = ids
            .iter()
            .map(|id| (id.clone(), Behaviour::Page(match_html(id))))
            .collect();
        Self {
            items: WorkItem::numbered(ids),
            pages,
            fail_workers: HashSet::new(),
            options: BatchOptions {
                workers,
                ..BatchOptions::default()
            },
            control: BatchControl::new(),
        }
    }

    fn set(&mut self, seq: usize, behaviour: Behaviour) {
        self.pages.insert(format!("m{seq}"), behaviour);
    }

    async fn run(self) -> (BatchResult, Vec<BatchEvent>, usize) {
        let released = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(FakeProvider {
            pages: Arc::new(self.pages),
            fail_workers: self.fail_workers,
            control: self.control.clone(),
            released: released.clone(),
        });
        let extractor = Arc::new(Extractor::with_defaults().unwrap());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let result = run_batch(
            provider,
            extractor,
            self.items,
            &self.options,
            &self.control,
            tx,
        )
        .await;

        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e);
        }
        (result, events, released.load(Ordering::SeqCst))
    }
}

fn failed_seqs(result: &BatchResult, kind: ErrorKind) -> Vec<usize> {
    let mut seqs: Vec<usize> = result
        .failures
        .entries()
        .iter()
        .filter(|f| f.kind == kind)
        .map(|f| f.sequence_number)
        .collect();
    seqs.sort();
    seqs
}

fn record_seqs(result: &BatchResult) -> HashSet<usize> {
    result
        .records
        .iter()
        .filter_map(|r| r.sequence_number())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn one_timeout_in_twenty_three_items() {
    let mut harness = Harness::new(23, 4);
    harness.set(7, Behaviour::Hang);
    let control = harness.control.clone();

    let (result, events, released) = harness.run().await;

    assert_eq!(result.total, 23);
    assert_eq!(result.completed, 23);
    assert_eq!(control.progress.completed(), 23);
    assert_eq!(result.succeeded, 22);
    assert_eq!(result.failed(), 1);

    let failure = &result.failures.entries()[0];
    assert_eq!(failure.sequence_number, 7);
    assert_eq!(failure.page_identifier, "m7");
    assert_eq!(failure.kind, ErrorKind::PageTimeout);

    let seqs = record_seqs(&result);
    assert_eq!(seqs.len(), 22);
    assert!(!seqs.contains(&7));
    assert_eq!(result.records.len(), 44);
    assert_eq!(released, 4);

    assert!(matches!(
        events.first(),
        Some(BatchEvent::Started { total: 23, workers: 4 })
    ));
    assert!(matches!(events.last(), Some(BatchEvent::Done)));
}

#[tokio::test]
async fn records_come_back_in_sequence_order() {
    let (result, _, _) = Harness::new(9, 3).run().await;
    let seqs: Vec<usize> = result
        .records
        .iter()
        .filter_map(|r| r.sequence_number())
        .collect();
    let mut sorted = seqs.clone();
    sorted.sort();
    assert_eq!(seqs, sorted);
    assert_eq!(result.records[0].get("player"), Some("Keeper m1"));
    assert_eq!(result.records[1].get("player"), Some("Striker m1"));
    assert_eq!(result.records[1].get("player_team"), Some("Away m1 FC"));
}

#[tokio::test]
async fn failed_acquisition_fails_only_that_shard() {
    let mut harness = Harness::new(12, 4);
    harness.fail_workers.insert(1);

    let (result, events, released) = harness.run().await;

    assert_eq!(failed_seqs(&result, ErrorKind::SessionAcquisition), vec![4, 5, 6]);
    assert_eq!(result.succeeded, 9);
    assert_eq!(result.completed, 12);
    assert_eq!(released, 3);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, BatchEvent::ShardFailed { shard: 1, .. }))
    );
}

#[tokio::test]
async fn item_errors_are_recorded_and_the_shard_continues() {
    let mut harness = Harness::new(4, 1);
    harness.set(2, Behaviour::NavigationError);
    harness.set(3, Behaviour::Blocked);

    let (result, _, released) = harness.run().await;

    assert_eq!(failed_seqs(&result, ErrorKind::Navigation), vec![2]);
    assert_eq!(failed_seqs(&result, ErrorKind::StructureMismatch), vec![3]);
    assert_eq!(record_seqs(&result), HashSet::from([1, 4]));
    assert_eq!(result.succeeded + result.failed(), 4);
    assert_eq!(released, 1);
}

#[tokio::test]
async fn cancelled_before_start_fails_every_item() {
    let harness = Harness::new(5, 2);
    harness.control.cancel();

    let (result, _, released) = harness.run().await;

    assert_eq!(failed_seqs(&result, ErrorKind::Cancelled), vec![1, 2, 3, 4, 5]);
    assert_eq!(result.succeeded, 0);
    assert_eq!(result.completed, 5);
    assert_eq!(released, 0);
}

#[tokio::test]
async fn cancelling_mid_run_lets_the_current_item_finish() {
    let mut harness = Harness::new(5, 1);
    harness.set(2, Behaviour::CancelAfter(match_html("m2")));

    let (result, _, released) = harness.run().await;

    assert_eq!(record_seqs(&result), HashSet::from([1, 2]));
    assert_eq!(failed_seqs(&result, ErrorKind::Cancelled), vec![3, 4, 5]);
    assert_eq!(result.completed, 5);
    assert_eq!(released, 1);
}

#[tokio::test]
async fn panicking_session_is_contained() {
    let mut harness = Harness::new(6, 2);
    harness.set(2, Behaviour::Panic);

    let (result, _, released) = harness.run().await;

    assert_eq!(failed_seqs(&result, ErrorKind::Internal), vec![2, 3]);
    assert_eq!(record_seqs(&result), HashSet::from([1, 4, 5, 6]));
    assert_eq!(result.completed, 6);
    assert_eq!(released, 2);
}

#[tokio::test(start_paused = true)]
async fn item_delay_paces_each_worker() {
    let mut harness = Harness::new(3, 1);
    harness.options.item_delay = Duration::from_secs(2);

    let start = tokio::time::Instant::now();
    let (result, _, _) = harness.run().await;

    assert_eq!(result.succeeded, 3);
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test]
async fn checkpoints_are_written_every_n_items() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.progress.csv");
    let mut harness = Harness::new(5, 1);
    harness.options.checkpoint_every = 2;
    harness.options.checkpoint_path = Some(path.clone());

    let (_, events, _) = harness.run().await;

    let rows: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            BatchEvent::Checkpoint { rows, .. } => Some(*rows),
            _ => None,
        })
        .collect();
    assert_eq!(rows, vec![4, 8]);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("seq,date,round,match_id,referee,home_team,away_team,player_team,player,Goals,Shots\n"));
    assert_eq!(contents.lines().count(), 9);
}

#[tokio::test]
async fn empty_batch_is_done_immediately() {
    let (result, events, released) = Harness::new(0, 4).run().await;
    assert_eq!(result.total, 0);
    assert_eq!(result.completed, 0);
    assert_eq!(released, 0);
    assert!(matches!(events.last(), Some(BatchEvent::Done)));
}
