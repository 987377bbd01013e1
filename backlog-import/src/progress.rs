//! Progress reporting for imports and enrichment passes.

/// Receives progress updates from a long-running pass.
pub trait ImportProgress {
    /// Called after each game is handled, skipped or not.
    fn on_item(&self, current: usize, total: usize, title: &str);

    /// Called when a pass starts (e.g., "Importing 312 Steam games").
    fn on_phase(&self, message: &str);

    /// Called once the pass has finished.
    fn on_complete(&self, message: &str);
}

/// Discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_item(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Writes updates through the `log` crate, one line per 100 games.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_item(&self, current: usize, total: usize, title: &str) {
        if current.is_multiple_of(100) || current == total {
            log::info!("  [{}/{}] {}", current, total, title);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
