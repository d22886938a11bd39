//! Single-slot, deadline-based debouncing of user input.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds at most one pending value. Every [`Debouncer::push`] replaces it and
/// restarts the delay, so a burst of input yields one value once the input
/// pauses for the full delay.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn push(&mut self, value: T) {
        self.pending = Some(Pending {
            value,
            deadline: Instant::now() + self.delay,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll_ready(&mut self) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= Instant::now() => self.cancel(),
            _ => None,
        }
    }

    /// Waits for the pending value's deadline and takes it. Returns `None`
    /// immediately when nothing is pending.
    ///
    /// Cancel safe: dropping the future before it resolves leaves the value
    /// pending.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.cancel()
    }
}
