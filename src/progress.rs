//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn StripProgressCallback>`] via
//! [`crate::config::StripConfigBuilder::progress_callback`] to receive events
//! as [`crate::strip_files`] works through its inputs. The CLI uses this to
//! drive its progress bar; a library caller might log or count instead.
//!
//! # Example
//!
//! ```rust
//! use mdstrip::{StripConfig, StripProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     done: AtomicUsize,
//! }
//!
//! impl StripProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, _index: usize, _total: usize, _name: &str, _len: usize) {
//!         self.done.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { done: AtomicUsize::new(0) });
//! let config = StripConfig::builder()
//!     .progress_callback(counter as Arc<dyn StripProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by [`crate::strip_files`] as it processes each file.
///
/// Files are processed concurrently, so `on_file_*` methods may be called
/// from different tasks at once and in any order. All methods default to
/// no-ops.
pub trait StripProgressCallback: Send + Sync {
    /// Called once before any file is read.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a file is read.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position of the file in the batch
    /// * `total` — number of files in the batch
    /// * `name`  — display name of the file
    fn on_file_start(&self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called when a file was stripped and written.
    ///
    /// `output_len` is the byte length of the cleaned text.
    fn on_file_complete(&self, index: usize, total: usize, name: &str, output_len: usize) {
        let _ = (index, total, name, output_len);
    }

    /// Called when a file could not be processed.
    fn on_file_error(&self, index: usize, total: usize, name: &str, error: &str) {
        let _ = (index, total, name, error);
    }

    /// Called once after every file has been attempted.
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation, the default when no callback is configured.
pub struct NoopProgressCallback;

impl StripProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::StripConfig`].
pub type ProgressCallback = Arc<dyn StripProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        batch_total: AtomicUsize,
        batch_ok: AtomicUsize,
    }

    impl StripProgressCallback for TrackingCallback {
        fn on_batch_start(&self, total_files: usize) {
            self.batch_total.store(total_files, Ordering::SeqCst);
        }

        fn on_file_start(&self, _index: usize, _total: usize, _name: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_complete(&self, _index: usize, _total: usize, _name: &str, _len: usize) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_file_error(&self, _index: usize, _total: usize, _name: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total_files: usize, success_count: usize) {
            self.batch_ok.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_file_start(1, 2, "a.md");
        cb.on_file_complete(1, 2, "a.md", 10);
        cb.on_file_error(2, 2, "b.md", "missing");
        cb.on_batch_complete(2, 1);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_batch_start(3);
        tracker.on_file_start(1, 3, "a.md");
        tracker.on_file_complete(1, 3, "a.md", 100);
        tracker.on_file_start(2, 3, "b.md");
        tracker.on_file_complete(2, 3, "b.md", 200);
        tracker.on_file_start(3, 3, "c.md");
        tracker.on_file_error(3, 3, "c.md", "not found");
        tracker.on_batch_complete(3, 2);

        assert_eq!(tracker.batch_total.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.batch_ok.load(Ordering::SeqCst), 2);
    }
}
