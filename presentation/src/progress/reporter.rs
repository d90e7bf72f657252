//! Live console output during a dialog run

use colloquy_application::ports::observer::DialogObserver;
use colloquy_domain::{ActionKind, SpeakerId};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Prints each turn as it is spoken, with a spinner while the
/// generator is working on the next one.
pub struct ConsoleReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    /// Clear any leftover spinner; call after the run, error or not.
    pub fn finish(&self) {
        self.clear_spinner();
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    fn start_spinner(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.lock().unwrap() = Some(pb);
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.spinner.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }

    fn scene_line(text: &str) -> String {
        format!("{} {}", "Scene:".cyan().bold(), text)
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogObserver for ConsoleReporter {
    fn on_generation_start(&self, speaker: &SpeakerId) {
        self.start_spinner(format!("{} is thinking...", speaker));
    }

    fn on_scene(&self, text: &str) {
        self.clear_spinner();
        println!("{}", Self::scene_line(text));
        println!();
    }

    fn on_greeting(&self, speaker: &SpeakerId, text: &str) {
        self.clear_spinner();
        println!("{}: {}", speaker.as_str().green().bold(), text);
    }

    fn on_round_start(&self, round: u32) {
        println!("\n{}", format!("--- Round {} ---", round).cyan().bold());
    }

    fn on_turn(&self, speaker: &SpeakerId, action: ActionKind, text: &str) {
        self.clear_spinner();
        println!(
            "{} {}: {}",
            speaker.as_str().green().bold(),
            format!("({})", action).dimmed(),
            text
        );
    }

    fn on_dialog_complete(&self, rounds_completed: u32) {
        self.clear_spinner();
        println!(
            "\n{}",
            format!("Dialog complete after {} rounds", rounds_completed).cyan()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_header_and_text_share_one_line() {
        let line = ConsoleReporter::scene_line("Ein Cafe am Fluss, später Nachmittag.");
        assert!(line.contains("Scene:"));
        assert!(line.contains("Ein Cafe am Fluss, später Nachmittag."));
        assert!(!line.contains('\n'));
    }
}
