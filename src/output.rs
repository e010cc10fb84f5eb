//! Timestamped log output.
//!
//! All run reporting goes through this module so the format stays
//! consistent: a local `%Y-%m-%d %H:%M:%S` timestamp followed by the
//! message. Errors go to stderr, everything else to stdout.

use chrono::Local;
use colored::*;

/// Manages CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Prints an informational message.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use downsort::output::OutputFormatter;
    /// OutputFormatter::info("Organizing files in /home/user/Downloads");
    /// ```
    pub fn info(message: &str) {
        println!("{} - {}", Self::timestamp().dimmed(), message);
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} - {} {}", Self::timestamp().dimmed(), "✓".green(), message);
    }

    /// Prints an error message in red with an X mark, to stderr.
    pub fn error(message: &str) {
        eprintln!("{} - {} {}", Self::timestamp().dimmed(), "✗".red(), message.red());
    }

    /// Prints a plain message without timestamp or styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }
}
