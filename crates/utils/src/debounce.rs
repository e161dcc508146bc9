//! Input debouncing on top of the tokio clock.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Holds a settled value and at most one pending replacement.
///
/// A pushed value only becomes visible through [`Debouncer::value`] once it has
/// been left alone for `delay`. Every push restarts the window.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record new raw input and restart the quiet window.
    pub fn push(&mut self, value: T) {
        if value == self.settled {
            // typed back to what is already applied
            self.pending = None;
            return;
        }
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// The most recent raw input, settled or not.
    pub fn latest(&self) -> &T {
        self.pending
            .as_ref()
            .map(|(value, _)| value)
            .unwrap_or(&self.settled)
    }

    /// The value downstream consumers should act on.
    pub fn value(&self) -> &T {
        &self.settled
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Promote the pending value if its window has elapsed.
    ///
    /// Returns `true` when the settled value changed.
    pub fn poll(&mut self) -> bool {
        match self.pending.take() {
            Some((value, deadline)) if deadline <= Instant::now() => {
                self.settled = value;
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Apply the pending value immediately, skipping the rest of the window.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((value, _)) => {
                self.settled = value;
                true
            }
            None => false,
        }
    }

    /// Sleep until the pending value (if any) settles, then return the settled value.
    pub async fn settled(&mut self) -> &T {
        if let Some(deadline) = self.deadline() {
            sleep_until(deadline).await;
            self.poll();
        }
        &self.settled
    }
}
