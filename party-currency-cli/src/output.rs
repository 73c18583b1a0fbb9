//! Output formatting utilities

use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use party_currency_core::ports::{Notifier, Pending};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Optional text for a table cell
pub fn cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Renders feedback as a spinner on stderr plus colored result lines
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinnerNotifier;

struct Spinner(ProgressBar);

impl Pending for Spinner {
    fn succeed(self: Box<Self>, message: Option<&str>) {
        self.0.finish_and_clear();
        if let Some(message) = message {
            success(&format!("✓ {}", message));
        }
    }

    fn fail(self: Box<Self>, message: &str) {
        self.0.finish_and_clear();
        error(&format!("✗ {}", message));
    }
}

impl Notifier for SpinnerNotifier {
    fn loading(&self, message: &str) -> Box<dyn Pending> {
        // No animation when stderr is piped
        let spinner = if atty::is(atty::Stream::Stderr) {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(message.to_string());
        Box::new(Spinner(spinner))
    }

    fn success(&self, message: &str) {
        success(&format!("✓ {}", message));
    }

    fn error(&self, message: &str) {
        error(&format!("✗ {}", message));
    }

    fn info(&self, message: &str) {
        info(message);
    }
}
