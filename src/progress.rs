use indicatif::{ProgressBar, ProgressStyle};

use crate::model::Progress;

/// Terminal progress bar fed by cleanup progress events.
///
/// Draws to stderr and stays invisible when stderr is not a terminal.
pub struct CleanupProgress {
    bar: ProgressBar,
}

impl CleanupProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} projects")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    pub fn update(&self, progress: Progress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.completed as u64);
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Default for CleanupProgress {
    fn default() -> Self {
        CleanupProgress::new()
    }
}
