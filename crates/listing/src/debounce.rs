//! Debounced search input.
//!
//! Keystrokes land in a local buffer immediately; the buffer is committed
//! upstream only after the input has been quiet for the configured period.
//! Each keystroke cancels the pending timer and arms a new one, so only the
//! last keystroke's timer can fire.
//!
//! The timer is a spawned tokio task owned through `TimerHandle`, which
//! aborts the task when dropped. Firings carry the generation they were
//! armed with; anything older than the current generation is ignored.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet period used when none is configured
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Message sent by an elapsed timer
#[derive(Debug)]
struct TimerFired {
    generation: u64,
    value: String,
}

/// A pending debounce timer. Dropping the handle cancels the timer.
#[derive(Debug)]
struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    fn arm(
        quiet_period: Duration,
        generation: u64,
        value: String,
        fired_tx: mpsc::UnboundedSender<TimerFired>,
    ) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = fired_tx.send(TimerFired { generation, value });
        });
        Self { task }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Search text buffer with a debounced commit.
///
/// Must be used from within a tokio runtime: `input` spawns the timer task.
#[derive(Debug)]
pub struct SearchDebouncer {
    local_value: String,
    committed_value: String,
    quiet_period: Duration,
    generation: u64,
    timer: Option<TimerHandle>,
    fired_tx: mpsc::UnboundedSender<TimerFired>,
    fired_rx: mpsc::UnboundedReceiver<TimerFired>,
}

impl SearchDebouncer {
    /// Create a debouncer whose buffer starts at `committed`.
    ///
    /// Construction never publishes anything.
    pub fn new(committed: impl Into<String>, quiet_period: Duration) -> Self {
        let committed = committed.into();
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        Self {
            local_value: committed.clone(),
            committed_value: committed,
            quiet_period,
            generation: 0,
            timer: None,
            fired_tx,
            fired_rx,
        }
    }

    /// Text as currently typed
    pub fn local_value(&self) -> &str {
        &self.local_value
    }

    /// Last text sent upstream
    pub fn committed_value(&self) -> &str {
        &self.committed_value
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Record a keystroke: update the buffer now, re-arm the timer.
    pub fn input(&mut self, value: impl Into<String>) {
        self.local_value = value.into();
        self.cancel();

        self.generation += 1;
        self.timer = Some(TimerHandle::arm(
            self.quiet_period,
            self.generation,
            self.local_value.clone(),
            self.fired_tx.clone(),
        ));
    }

    /// The upstream value changed on its own (e.g. a filter reset).
    ///
    /// Both buffers take the new value, any pending timer is cancelled and
    /// nothing is published. Calling this with the current committed value
    /// does nothing.
    pub fn sync_committed(&mut self, value: &str) {
        if value == self.committed_value {
            return;
        }
        debug!("Search resynchronized to {:?}", value);
        self.cancel();
        self.committed_value = value.to_string();
        self.local_value = value.to_string();
    }

    /// Drop the pending timer, if any
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            // Invalidate a firing that may already be queued
            self.generation += 1;
        }
    }

    /// Wait for the next commit and return the committed text.
    ///
    /// Cancel safe: no commit is lost if the future is dropped before it
    /// completes. A timer whose text equals the committed value settles
    /// without publishing.
    pub async fn next_commit(&mut self) -> String {
        loop {
            let Some(fired) = self.fired_rx.recv().await else {
                // The sender lives in `self`, so this is unreachable in
                // practice; park instead of spinning.
                return std::future::pending().await;
            };

            if let Some(value) = self.accept(fired) {
                return value;
            }
        }
    }

    fn accept(&mut self, fired: TimerFired) -> Option<String> {
        if fired.generation != self.generation {
            debug!("Ignoring superseded search timer #{}", fired.generation);
            return None;
        }

        self.timer = None;
        if fired.value == self.committed_value {
            return None;
        }

        debug!("Committing search {:?}", fired.value);
        self.committed_value = fired.value.clone();
        Some(fired.value)
    }
}
