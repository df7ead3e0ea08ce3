//! Progress outbound port. The analysis pipeline reports coarse stages through it.

/// Receives pipeline stage updates. Percent is 0..=100.
pub trait ProgressPort: Send + Sync {
    fn stage(&self, percent: u64, message: &str);

    /// Clear any progress indicator once the pipeline is done (success or not).
    fn finish(&self);
}

/// Discards progress updates. Used by tests and non-interactive callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressPort for NoopProgress {
    fn stage(&self, _percent: u64, _message: &str) {}

    fn finish(&self) {}
}
