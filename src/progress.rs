//! Spinner shown while long-running external commands execute

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Spinner drawn on stderr, hidden when stderr is not a terminal
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Start spinning with `message`
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        if !console::Term::stderr().is_term() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        Self { pb }
    }

    /// Stop and erase the spinner
    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}
