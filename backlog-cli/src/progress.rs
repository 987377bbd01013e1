//! Terminal progress bar for imports and enrichment passes.

use std::io::IsTerminal;

use backlog_import::{ImportProgress, LogProgress};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// A progress bar on an interactive terminal, periodic log lines otherwise.
pub(crate) fn reporter(quiet: bool) -> Box<dyn ImportProgress> {
    if !quiet && std::io::stderr().is_terminal() {
        Box::new(BarProgress::new())
    } else {
        Box::new(LogProgress)
    }
}

/// Draws an `indicatif` bar on stderr.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        let style = ProgressStyle::with_template("  {bar:30.cyan/blue} {pos:>5}/{len:5} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }
}

impl ImportProgress for BarProgress {
    fn on_item(&self, current: usize, total: usize, title: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
        self.bar.set_message(title.to_string());
    }

    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::debug!("{}", message);
    }
}
