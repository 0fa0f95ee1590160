//! Shard pool: one long-lived tokio task per shard.
//!
//! Each shard task owns its slice of work for the whole run (and whatever
//! per-worker resource the caller sets up inside `shard_fn`). Results are
//! sent to an unbounded channel as they are produced, so the caller sees
//! per-item outcomes in completion order rather than per-shard batches.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A pool of shard tasks that report results over a shared channel.
///
/// # Example
///
/// ```ignore
/// let mut pool = ShardPool::start(shards, |index, shard, tx| async move {
///     for item in shard {
///         let _ = tx.send(process(index, item).await);
///     }
/// });
///
/// while let Some(result) = pool.recv().await {
///     handle(result);
/// }
/// let panicked = pool.join().await;
/// ```
pub struct ShardPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<R>,
    handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> ShardPool<R> {
    /// Spawn one task per shard and return a pool for receiving results.
    ///
    /// `shard_fn` receives the 0-based shard index, the shard's items and a
    /// sender for results. The result channel closes once every shard task
    /// has returned (or panicked), at which point [`recv()`](Self::recv)
    /// yields `None`.
    pub fn start<W, F, Fut>(shards: Vec<Vec<W>>, shard_fn: F) -> Self
    where
        W: Send + 'static,
        F: Fn(usize, Vec<W>, mpsc::UnboundedSender<R>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
        let shard_fn = Arc::new(shard_fn);

        let handles: Vec<JoinHandle<()>> = shards
            .into_iter()
            .enumerate()
            .map(|(index, shard)| {
                let result_tx = result_tx.clone();
                let shard_fn = shard_fn.clone();
                log::debug!("Shard pool: starting shard {} ({} items)", index, shard.len());
                tokio::spawn(async move {
                    shard_fn(index, shard, result_tx).await;
                    log::debug!("Shard pool: shard {} finished", index);
                })
            })
            .collect();

        // Channel closes when the last shard task drops its sender
        drop(result_tx);

        Self { result_rx, handles }
    }

    /// Number of shard tasks started.
    pub fn shard_count(&self) -> usize {
        self.handles.len()
    }

    /// Receive the next result. Returns `None` once every shard has finished.
    pub async fn recv(&mut self) -> Option<R> {
        self.result_rx.recv().await
    }

    /// Wait for all shard tasks and return the indices of those that panicked.
    pub async fn join(self) -> Vec<usize> {
        let mut panicked = Vec::new();
        for (index, handle) in self.handles.into_iter().enumerate() {
            match handle.await {
                Ok(()) => {}
                Err(e) if e.is_panic() => {
                    log::error!("Shard {} panicked; its unfinished items are lost", index);
                    panicked.push(index);
                }
                Err(e) => {
                    log::warn!("Shard {} did not complete: {}", index, e);
                    panicked.push(index);
                }
            }
        }
        panicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_shard_reports_its_items() {
        let shards = vec![vec![1, 2, 3], vec![4, 5], vec![6]];
        let mut pool = ShardPool::start(shards, |index, shard, tx| async move {
            for item in shard {
                let _ = tx.send((index, item * 10));
            }
        });
        assert_eq!(pool.shard_count(), 3);

        let mut results = Vec::new();
        while let Some(r) = pool.recv().await {
            results.push(r);
        }
        results.sort();
        assert_eq!(
            results,
            vec![(0, 10), (0, 20), (0, 30), (1, 40), (1, 50), (2, 60)]
        );
        assert!(pool.join().await.is_empty());
    }

    #[tokio::test]
    async fn no_shards_closes_immediately() {
        let mut pool: ShardPool<u32> =
            ShardPool::start(Vec::<Vec<u32>>::new(), |_, _, _| async {});
        assert!(pool.recv().await.is_none());
        assert!(pool.join().await.is_empty());
    }

    #[tokio::test]
    async fn panicking_shard_does_not_stop_the_others() {
        let shards = vec![vec![1u32], vec![2u32]];
        let mut pool = ShardPool::start(shards, |index, shard, tx| async move {
            if index == 0 {
                panic!("boom");
            }
            for item in shard {
                let _ = tx.send(item);
            }
        });

        let mut results = Vec::new();
        while let Some(r) = pool.recv().await {
            results.push(r);
        }
        assert_eq!(results, vec![2]);
        assert_eq!(pool.join().await, vec![0]);
    }
}
