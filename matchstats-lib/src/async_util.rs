//! Drive a batch future while consuming its progress events.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// How long to keep reading events after the task has returned.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Await `task` while handing every event from `event_rx` to `on_event`.
///
/// After the task returns, events still queued are drained until the channel
/// closes or [`DRAIN_TIMEOUT`] passes (a sender held by a detached task would
/// otherwise block forever). The task's output is returned.
pub async fn run_with_events<F, E, R>(
    task: F,
    mut event_rx: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);
    let mut seen: u64 = 0;

    let output = loop {
        tokio::select! {
            r = &mut task => break Some(r),
            event = event_rx.recv() => match event {
                Some(e) => {
                    seen += 1;
                    on_event(e);
                }
                None => break None,
            },
        }
    };

    let output = match output {
        Some(r) => r,
        None => {
            log::debug!("Event channel closed after {} events; awaiting task", seen);
            return task.await;
        }
    };

    let deadline = Instant::now() + DRAIN_TIMEOUT;
    loop {
        match tokio::time::timeout_at(deadline, event_rx.recv()).await {
            Ok(Some(e)) => {
                seen += 1;
                on_event(e);
            }
            Ok(None) => break,
            Err(_) => {
                log::warn!(
                    "Stopped draining events after {}s; a sender is still alive",
                    DRAIN_TIMEOUT.as_secs()
                );
                break;
            }
        }
    }
    log::debug!("Task finished, {} events handled", seen);

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drains_events_sent_before_and_after_completion() {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = async move {
            for i in 0..5 {
                tx.send(i).unwrap();
                tokio::task::yield_now().await;
            }
            "done"
        };

        let mut events = Vec::new();
        let out = run_with_events(task, rx, |e| events.push(e)).await;
        assert_eq!(out, "done");
        assert_eq!(events, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn channel_closing_first_still_returns_task_output() {
        let (tx, rx) = mpsc::unbounded_channel::<u8>();
        drop(tx);
        let out = run_with_events(async { 42 }, rx, |_| {}).await;
        assert_eq!(out, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn leaked_sender_does_not_block_forever() {
        let (tx, rx) = mpsc::unbounded_channel::<u8>();
        let out = run_with_events(async { 7 }, rx, |_| {}).await;
        assert_eq!(out, 7);
        drop(tx);
    }
}
