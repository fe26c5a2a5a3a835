use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::scan::Progress;

const TEMPLATE: &str = "{prefix} [{bar:50.cyan}] {percent}% ({pos}/{len})";

/// Single progress line redrawn in place.
///
/// indicatif draws on stderr rather than stdout, so the report on stdout
/// stays clean when redirected.
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    pub fn new(total: usize) -> Self {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");

        let bar = ProgressBar::new(total as u64);
        bar.set_style(style);
        bar.set_prefix("Scanning:".bright_cyan().bold().to_string());

        Self { bar }
    }
}

impl Progress for TerminalProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        self.bar.set_position(completed as u64);
        if completed >= total {
            self.bar.finish();
        }
    }
}
