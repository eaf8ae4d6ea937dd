//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive
//! events as the worker pool completes each file. The CLI renders them as an
//! indicatif progress bar; other callers can forward them anywhere.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdf2txt::{BatchConfig, BatchProgressCallback, JobOutcome};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, source: &Path, outcome: &JobOutcome) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("#{done} {} {}", outcome.label(), source.display());
//!     }
//! }
//!
//! let config = BatchConfig::builder("in", "out")
//!     .progress_callback(Arc::new(CountingCallback { completed: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::{BatchStats, JobOutcome};
use std::path::Path;
use std::sync::Arc;

/// Called by the dispatcher as files move through the pool.
///
/// Implementations must be `Send + Sync`: `on_file_start` and
/// `on_file_complete` are called concurrently and in completion order, not
/// discovery order. All methods default to no-ops.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once, after discovery and before any job is dispatched.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a job starts running.
    fn on_file_start(&self, source: &Path) {
        let _ = source;
    }

    /// Called when a job reaches a terminal state.
    fn on_file_complete(&self, source: &Path, outcome: &JobOutcome) {
        let _ = (source, outcome);
    }

    /// Called once after every job has completed.
    fn on_batch_complete(&self, stats: &BatchStats) {
        let _ = stats;
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        total: AtomicUsize,
        starts: AtomicUsize,
        completes: AtomicUsize,
        finished_with: AtomicUsize,
    }

    impl BatchProgressCallback for TrackingCallback {
        fn on_batch_start(&self, total_files: usize) {
            self.total.store(total_files, Ordering::SeqCst);
        }

        fn on_file_start(&self, _source: &Path) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _source: &Path, _outcome: &JobOutcome) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, stats: &BatchStats) {
            self.finished_with.store(stats.completed(), Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_file_start(Path::new("a.pdf"));
        cb.on_file_complete(Path::new("a.pdf"), &JobOutcome::Ignored);
        cb.on_batch_complete(&BatchStats::default());
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();
        tracker.on_batch_start(2);
        tracker.on_file_start(Path::new("a.pdf"));
        tracker.on_file_complete(Path::new("a.pdf"), &JobOutcome::Unchanged);
        tracker.on_file_start(Path::new("b.pdf"));
        tracker.on_file_complete(Path::new("b.pdf"), &JobOutcome::Ignored);

        let mut stats = BatchStats::default();
        stats.record(Path::new("a.pdf"), &JobOutcome::Unchanged);
        stats.record(Path::new("b.pdf"), &JobOutcome::Ignored);
        tracker.on_batch_complete(&stats);

        assert_eq!(tracker.total.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.finished_with.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_batch_start(10);
        cb.on_file_start(Path::new("x.pdf"));
    }
}
