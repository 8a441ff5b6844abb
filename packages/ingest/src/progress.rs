//! Progress reporting for long dataset loads.
//!
//! Decouples the loaders from any rendering backend. The CLI provides an
//! `indicatif` implementation; tests and quiet paths use [`NullProgress`].

use std::sync::Arc;

/// Row-level progress sink for dataset loaders.
pub trait ProgressCallback: Send + Sync {
    /// Advances progress by `delta` rows.
    fn inc(&self, delta: u64);

    /// Replaces the displayed message.
    fn set_message(&self, msg: String);

    /// Marks the load complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
