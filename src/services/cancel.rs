//! Cooperative cancellation
//!
//! A [`CancelSignal`] is polled, never awaited: `check` looks at the current
//! value of a shutdown watch and at an optional deadline and returns
//! immediately. Signals are cheap to clone and can be handed to any number of
//! concurrent calculations.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::watch;

/// Why a signal fired
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Read side of a cancellation: an optional canceller plus an optional deadline.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    cancelled: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    /// Fires `DeadlineExceeded` once `deadline` has passed. Keeps the
    /// earlier deadline if one is already set.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Non-blocking poll. Explicit cancellation wins over the deadline.
    pub fn check(&self) -> Result<(), CancelCause> {
        if let Some(rx) = &self.cancelled {
            if *rx.borrow() {
                return Err(CancelCause::Cancelled);
            }
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(CancelCause::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }
}

/// Write side: every signal handed out by [`Canceller::signal`] fires once
/// [`Canceller::cancel`] is called.
#[derive(Debug)]
pub struct Canceller {
    tx: watch::Sender<bool>,
}

impl Canceller {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            cancelled: Some(self.tx.subscribe()),
            deadline: None,
        }
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once [`Canceller::cancel`] has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for Canceller {
    fn default() -> Self {
        Self::new()
    }
}
