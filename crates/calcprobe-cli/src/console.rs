//! CLI console utilities
//!
//! Status lines go to stderr so that results on stdout stay pipeable.

use calcprobe_eval::CaseStatus;
use colored::*;

/// CLI console for formatted status output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message, only in verbose mode
    pub fn info(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }
}

/// Coloured mark for a case status
pub fn status_mark(status: CaseStatus) -> ColoredString {
    match status {
        CaseStatus::Passed => "✓".green().bold(),
        CaseStatus::Failed => "✗".red().bold(),
        CaseStatus::Timeout => "⏱".yellow().bold(),
        CaseStatus::Error => "!".red().bold(),
    }
}

/// Coloured label for a case status
pub fn status_label(status: CaseStatus) -> ColoredString {
    match status {
        CaseStatus::Passed => status.label().green(),
        CaseStatus::Failed => status.label().red(),
        CaseStatus::Timeout => status.label().yellow(),
        CaseStatus::Error => status.label().red().bold(),
    }
}
