//! Live progress for an extraction run.
//!
//! One overall bar (`completed/total`) plus a spinner line per worker that
//! shows the page it is loading.

use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use matchstats_scraper::BatchEvent;

pub(crate) struct BatchDisplay {
    mp: MultiProgress,
    bar: ProgressBar,
    workers: HashMap<usize, ProgressBar>,
}

impl BatchDisplay {
    /// When `quiet` is true nothing is drawn.
    pub(crate) fn new(quiet: bool) -> Self {
        let mp = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };

        let bar = mp.add(ProgressBar::new(0));
        bar.set_style(
            ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} pages {msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );

        Self {
            mp,
            bar,
            workers: HashMap::new(),
        }
    }

    fn spinner(&mut self, shard: usize) -> &ProgressBar {
        let mp = &self.mp;
        self.workers.entry(shard).or_insert_with(|| {
            let pb = mp.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                    .expect("static pattern")
                    .tick_chars("/-\\|"),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        })
    }

    fn release(&mut self, shard: usize) {
        if let Some(pb) = self.workers.remove(&shard) {
            pb.disable_steady_tick();
            pb.finish_and_clear();
        }
    }

    pub(crate) fn handle(&mut self, event: BatchEvent) {
        match event {
            BatchEvent::Started { total, .. } => {
                self.bar.set_length(total as u64);
            }
            BatchEvent::ShardStarted { shard, items } => {
                self.spinner(shard)
                    .set_message(format!("worker {}: {} pages", shard + 1, items));
            }
            BatchEvent::ShardFailed { shard, .. } => {
                self.release(shard);
            }
            BatchEvent::ItemStarted {
                shard,
                sequence_number,
                page_identifier,
            } => {
                self.spinner(shard).set_message(format!(
                    "worker {}: [{}] {}",
                    shard + 1,
                    sequence_number,
                    page_identifier
                ));
            }
            BatchEvent::ItemCompleted { completed, .. } | BatchEvent::ItemFailed { completed, .. } => {
                self.bar.set_position(completed as u64);
            }
            BatchEvent::Checkpoint { rows, .. } => {
                self.bar.set_message(format!("({} rows saved)", rows));
            }
            BatchEvent::Done => {}
        }
    }

    /// Clear every line.
    pub(crate) fn finish(&mut self) {
        let shards: Vec<usize> = self.workers.keys().copied().collect();
        for shard in shards {
            self.release(shard);
        }
        self.bar.finish_and_clear();
    }
}
