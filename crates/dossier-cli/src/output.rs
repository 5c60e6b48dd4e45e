//! Console output helpers for the CLI.

use colored::*;

/// Console writer honoring the color setting.
pub struct Console {
    color_enabled: bool,
}

impl Console {
    /// Create a new console writer.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Print a success line.
    pub fn success(&self, message: &str) {
        println!("{} {}", self.colorize("[SUCCESS]", Color::Green), message);
    }

    /// Print a claim-conflict line.
    pub fn locked(&self, message: &str) {
        println!("{} {}", self.colorize("[LOCKED]", Color::Red), message);
    }

    /// Print a per-file validation verdict.
    pub fn verdict(&self, passed: bool) {
        if passed {
            println!("  {} Validation Passed", self.colorize("[OK]", Color::Green));
        } else {
            println!("  {} Validation Failed", self.colorize("[X]", Color::Red));
        }
    }

    /// Print an itemized detail line under a verdict.
    pub fn detail(&self, message: &str) {
        println!("    - {}", message);
    }

    /// Print a section heading under a verdict.
    pub fn heading(&self, message: &str) {
        println!("  {}", self.colorize(message, Color::Yellow));
    }

    /// Print a plain informational line.
    pub fn note(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a terminal error line to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.colorize("Error:", Color::Red), message);
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.color_enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}
