//! One-shot delayed task scheduling with liveness gating.
//!
//! Scheduled work is never cancelled outright: a task sleeps until its
//! fire time and then checks a shared liveness flag, becoming a no-op if
//! the owner has moved on. Tests drive this with tokio's paused clock, so
//! nothing here depends on wall time.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::{
    task::JoinHandle,
    time::{self, Duration},
};
use tracing::trace;

/// Liveness flag shared between a runtime and its scheduled tasks.
///
/// Doubles as a re-entrancy guard: [`Liveness::try_acquire`] flips the
/// flag from idle to live atomically, which is all the mutual exclusion a
/// single-threaded cooperative host needs.
#[derive(Clone, Debug, Default)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    /// Create a flag in the given state.
    pub fn new(live: bool) -> Self {
        Self(Arc::new(AtomicBool::new(live)))
    }

    /// Current state.
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Flip from idle to live. Returns false (and changes nothing) when
    /// already live.
    pub fn try_acquire(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    /// Return to idle.
    pub fn release(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Run `f` after `delay`, unconditionally.
pub fn run_after<F>(delay: Duration, f: F) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    tokio::spawn(async move {
        time::sleep(delay).await;
        f();
    })
}

/// Run `f` after `delay` if `live` is still set when the timer fires.
///
/// The liveness check happens at fire time only; clearing the flag does
/// not remove the task from the scheduler.
pub fn run_after_if<F>(delay: Duration, live: &Liveness, f: F) -> JoinHandle<()>
where
    F: FnOnce() + Send + 'static,
{
    let live = live.clone();
    tokio::spawn(async move {
        time::sleep(delay).await;
        if live.is_live() {
            f();
        } else {
            trace!(delay_ms = delay.as_millis() as u64, "scheduled task skipped, owner idle");
        }
    })
}
