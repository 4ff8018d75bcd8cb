//! Progress display for long roll batches such as the distribution check

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static DRAW_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar over a known number of draws
///
/// A hidden manager accepts the same calls and draws nothing, so callers do
/// not need to branch on `--quiet`.
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a visible progress bar for `total` draws labelled `label`
    pub fn new(label: &str, total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(DRAW_STYLE.clone());
        bar.set_prefix(label.to_string());
        Self { bar }
    }

    /// Create a manager that draws nothing
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Create a visible or hidden manager
    pub fn for_draws(label: &str, total: usize, visible: bool) -> Self {
        if visible {
            Self::new(label, total)
        } else {
            Self::hidden(total)
        }
    }

    /// Report the number of completed draws
    pub fn update(&self, completed: usize) {
        self.bar.set_position(completed as u64);
    }

    /// Completed draws reported so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish and leave `message` next to the full bar
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
