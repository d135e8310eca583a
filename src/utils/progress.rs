//! Progress indicators for long-running operations

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner on stderr; hidden when stderr is not a terminal
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Optional spinner that clears itself when dropped
pub struct Spinner {
    pb: Option<ProgressBar>,
}

impl Spinner {
    pub fn new(message: &str, enabled: bool) -> Self {
        Self {
            pb: enabled.then(|| create_spinner(message)),
        }
    }

    pub fn finish(mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}
