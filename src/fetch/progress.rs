/// Receives `(completed, total)` after every processed index
///
/// Called once with `completed == 0` before the first request. Rendering is
/// left to the implementor.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, completed: u32, total: u32);
}

impl<F> ProgressSink for F
where
    F: Fn(u32, u32) + Send + Sync,
{
    fn on_progress(&self, completed: u32, total: u32) {
        self(completed, total)
    }
}

/// No-op sink for silent operation
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {
    fn on_progress(&self, _completed: u32, _total: u32) {}
}
