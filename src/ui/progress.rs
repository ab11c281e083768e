use crate::ui::theme;
use crate::ui::Icons;
use indicatif::{HumanDuration, ProgressBar};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Progress bar for copying one file per reference
pub struct CopyProgress {
    bar: ProgressBar,
}

impl CopyProgress {
    pub fn new(total: usize) -> Self {
        let bar = if console::Term::stdout().is_term() {
            ProgressBar::new(total as u64).with_message("Copying files")
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn println(&self, line: &str) {
        self.bar.println(line);
    }

    pub fn finish_with_summary(&self, duration: Duration, copied: usize, overwritten: usize, skipped: usize) {
        self.bar.finish_and_clear();
        println!(
            "{} {}",
            Icons::CHECK.style(theme().success.clone()),
            format!("Complete in {}", HumanDuration(duration)).style(theme().success.clone())
        );
        println!(
            "  {} {}  {} {}",
            Icons::COPY.style(theme().info.clone()),
            copied,
            Icons::EMPTY.style(theme().dim.clone()),
            skipped
        );
        if overwritten > 0 {
            println!("  {} {} overwritten", Icons::WARN.style(theme().warn.clone()), overwritten);
        }
    }
}

pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        if console::Term::stdout().is_term() {
            pb.enable_steady_tick(Duration::from_millis(100));
        }
        Self { pb }
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }
}
