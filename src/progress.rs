//! In-process progress reporting and cancellation.
//!
//! Grounded on the source's shared-memory protocol between the search worker
//! and the request-serving task: a small fixed-size buffer the worker writes
//! and the requester polls at ~2Hz, plus a single cancellation flag the
//! requester sets once and the worker polls at frame boundaries. Here both
//! sides live in the same process, so `std::sync::atomic` and a
//! `std::sync::Mutex` stand in for the source's shared memory segment — this
//! crate has no network or async surface of its own, so there is no tokio
//! runtime to hang a channel off of.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// What the `Progress` trait exposes to a caller polling mid-search.
pub trait Progress {
    /// How many search frames (nodes) have been visited so far.
    fn frames(&self) -> u64;
    /// Current recursion depth (0..=5).
    fn depth(&self) -> u64;
    /// Best objective value found so far, formatted for display (empty
    /// before any incumbent is found).
    fn best_objective(&self) -> String;
    /// Wall-clock time spent searching so far.
    fn elapsed(&self) -> Duration;

    /// One-line human summary, analogous to the source's periodic log line.
    fn summary(&self) -> String {
        format!(
            "frames={} depth={} best={} elapsed={:.1}s",
            self.frames(),
            self.depth(),
            self.best_objective(),
            self.elapsed().as_secs_f64()
        )
    }
}

/// Shared handle a search worker writes into and a requester reads from.
/// Cloning shares the same underlying atomics/mutex (`Arc`-backed).
#[derive(Clone)]
pub struct SharedProgress {
    inner: std::sync::Arc<Inner>,
}

struct Inner {
    frames: AtomicU64,
    depth: AtomicU64,
    started: std::time::Instant,
    cancelled: AtomicBool,
    best_objective: Mutex<String>,
}

impl SharedProgress {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Arc::new(Inner {
                frames: AtomicU64::new(0),
                depth: AtomicU64::new(0),
                started: std::time::Instant::now(),
                cancelled: AtomicBool::new(false),
                best_objective: Mutex::new(String::new()),
            }),
        }
    }

    pub fn record_frame(&self, depth: u64) {
        self.inner.frames.fetch_add(1, Ordering::Relaxed);
        self.inner.depth.store(depth, Ordering::Relaxed);
    }

    pub fn record_incumbent(&self, objective: impl ToString) {
        if let Ok(mut guard) = self.inner.best_objective.lock() {
            *guard = objective.to_string();
        }
    }

    /// Requester-side: request cancellation. The worker observes this at its
    /// next frame-boundary poll, not instantly.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Relaxed);
    }

    /// Worker-side: cheap poll at pruning-frame exits.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SharedProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for SharedProgress {
    fn frames(&self) -> u64 {
        self.inner.frames.load(Ordering::Relaxed)
    }

    fn depth(&self) -> u64 {
        self.inner.depth.load(Ordering::Relaxed)
    }

    fn best_objective(&self) -> String {
        self.inner.best_objective.lock().map(|g| g.clone()).unwrap_or_default()
    }

    fn elapsed(&self) -> Duration {
        self.inner.started.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_frame_advances_counters() {
        let progress = SharedProgress::new();
        assert_eq!(progress.frames(), 0);
        progress.record_frame(1);
        progress.record_frame(2);
        assert_eq!(progress.frames(), 2);
        assert_eq!(progress.depth(), 2);
    }

    #[test]
    fn cancel_is_observed_through_a_clone() {
        let progress = SharedProgress::new();
        let worker_view = progress.clone();
        assert!(!worker_view.is_cancelled());
        progress.cancel();
        assert!(worker_view.is_cancelled());
    }

    #[test]
    fn summary_reflects_recorded_incumbent() {
        let progress = SharedProgress::new();
        progress.record_incumbent("42.0");
        assert!(progress.summary().contains("42.0"));
    }
}
