//! Colored output helpers for the CLI
//!
//! Renders progress updates and the final report consistently, with an
//! opt-out for colors.

use crate::types::ProgressUpdate;
use owo_colors::OwoColorize;

/// Output style configuration.
pub struct Output {
    /// Whether to use colored output.
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled.
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled.
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the minerva banner.
    pub fn banner(&self) {
        if self.colored {
            println!(
                "\n{} {}\n",
                "minerva".bright_cyan().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("\nminerva v{}\n", env!("CARGO_PKG_VERSION"));
        }
    }

    /// Render one progress update.
    pub fn progress(&self, update: &ProgressUpdate) {
        match update {
            ProgressUpdate::Report { markdown } => {
                println!();
                println!("{}", markdown);
            }
            ProgressUpdate::Failed { .. } => self.error(&update.to_string()),
            ProgressUpdate::SaveFailed { .. } => self.warning(&update.to_string()),
            _ => self.status(&update.to_string()),
        }
    }

    /// Print a status line.
    pub fn status(&self, message: &str) {
        if self.colored {
            println!("{} {}", "*".bright_cyan(), message);
        } else {
            println!("* {}", message);
        }
    }

    /// Print a warning.
    pub fn warning(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "!".yellow().bold(), message.yellow());
        } else {
            eprintln!("! {}", message);
        }
    }

    /// Print an error.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "x".red().bold(), message.red());
        } else {
            eprintln!("x {}", message);
        }
    }
}
