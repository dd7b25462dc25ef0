//! Trailing-edge debounce for search-box input.
//!
//! Every keystroke restarts the quiet timer. Only the last value of a burst
//! is forwarded, once no new value has arrived for the quiet interval.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

#[derive(Debug)]
enum Signal {
    Push(String),
    Cancel,
}

/// Handle for feeding raw query text into the debounce task.
///
/// Dropping the handle lets a pending value settle normally, then closes
/// the output channel.
#[derive(Debug, Clone)]
pub struct QueryDebouncer {
    tx: mpsc::UnboundedSender<Signal>,
}

impl QueryDebouncer {
    /// Spawn the debounce task. Settled queries arrive on the returned
    /// receiver.
    #[must_use]
    pub fn spawn(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        tokio::spawn(run(quiet, rx, out_tx));
        (Self { tx }, out_rx)
    }

    /// Record a new raw value, restarting the quiet timer.
    pub fn push(&self, text: impl Into<String>) {
        // The task only exits once every handle is gone.
        let _ = self.tx.send(Signal::Push(text.into()));
    }

    /// Discard any value still waiting to settle.
    pub fn cancel(&self) {
        let _ = self.tx.send(Signal::Cancel);
    }
}

async fn run(
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<Signal>,
    out: mpsc::UnboundedSender<String>,
) {
    let mut pending: Option<(String, Instant)> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, at)| *at);
        tokio::select! {
            signal = rx.recv() => match signal {
                Some(Signal::Push(text)) => pending = Some((text, Instant::now() + quiet)),
                Some(Signal::Cancel) => pending = None,
                None => break,
            },
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some((text, _)) = pending.take() {
                    tracing::debug!(query = %text, "query settled");
                    if out.send(text).is_err() {
                        return;
                    }
                }
            }
        }
    }

    if let Some((text, at)) = pending {
        sleep_until(at).await;
        let _ = out.send(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(400);

    async fn advance(ms: u64) {
        tokio::time::advance(Duration::from_millis(ms)).await;
    }

    /// Push and let the debounce task observe it at the current instant.
    async fn type_text(debouncer: &QueryDebouncer, text: &str) {
        debouncer.push(text);
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let (debouncer, mut settled) = QueryDebouncer::spawn(QUIET);

        type_text(&debouncer, "f").await;
        advance(100).await;
        type_text(&debouncer, "fo").await;
        advance(100).await;
        type_text(&debouncer, "foo").await;
        advance(401).await;

        assert_eq!(settled.recv().await.as_deref(), Some("foo"));
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_settles_before_quiet_interval() {
        let (debouncer, mut settled) = QueryDebouncer::spawn(QUIET);

        type_text(&debouncer, "a").await;
        advance(399).await;
        tokio::task::yield_now().await;
        assert!(settled.try_recv().is_err());

        advance(2).await;
        assert_eq!(settled.recv().await.as_deref(), Some("a"));
    }

    #[tokio::test(start_paused = true)]
    async fn gap_longer_than_quiet_settles_each_value() {
        let (debouncer, mut settled) = QueryDebouncer::spawn(QUIET);

        type_text(&debouncer, "a").await;
        advance(600).await;
        assert_eq!(settled.recv().await.as_deref(), Some("a"));

        type_text(&debouncer, "ab").await;
        advance(600).await;
        assert_eq!(settled.recv().await.as_deref(), Some("ab"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let (debouncer, mut settled) = QueryDebouncer::spawn(QUIET);

        type_text(&debouncer, "abc").await;
        advance(100).await;
        debouncer.cancel();
        drop(debouncer);

        assert_eq!(settled.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn closing_input_still_settles_last_value() {
        let (debouncer, mut settled) = QueryDebouncer::spawn(QUIET);

        type_text(&debouncer, "shelter").await;
        drop(debouncer);

        let start = Instant::now();
        assert_eq!(settled.recv().await.as_deref(), Some("shelter"));
        assert!(start.elapsed() >= QUIET);
        assert_eq!(settled.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_string_settles_like_any_other_value() {
        let (debouncer, mut settled) = QueryDebouncer::spawn(QUIET);

        type_text(&debouncer, "x").await;
        type_text(&debouncer, "").await;
        advance(401).await;

        assert_eq!(settled.recv().await.as_deref(), Some(""));
    }
}
