//! Progress reporting while the Court deliberates

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use trial_application::DeliberationNotifier;

/// Spinner shown while a turn request is outstanding
pub struct DeliberationSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl DeliberationSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn message(round: u32) -> String {
        if round == 0 {
            "The Court is convening...".to_string()
        } else {
            format!("The Court is deliberating (round {})...", round)
        }
    }
}

impl Default for DeliberationSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliberationNotifier for DeliberationSpinner {
    fn on_deliberation_start(&self, round: u32) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(Self::message(round));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_deliberation_end(&self, _success: bool) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DeliberationNotifier for SimpleProgress {
    fn on_deliberation_start(&self, round: u32) {
        println!("{} {}", "->".cyan(), DeliberationSpinner::message(round).bold());
    }

    fn on_deliberation_end(&self, success: bool) {
        if !success {
            println!("  {} no answer from the Court", "x".red());
        }
    }
}
