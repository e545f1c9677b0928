//! Terminal styling helpers
//!
//! Styled strings carry ANSI codes; print them through `anstream` so the codes
//! are stripped when stdout is not a terminal.

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

/// Semantic styles for CLI output
pub trait Stylize {
    /// Identifiers, paths and URLs
    fn accent(&self) -> String;
    /// Secondary information
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
    /// Positive outcomes
    fn success(&self) -> String;
    /// Negative outcomes
    fn failure(&self) -> String;
    /// Outcomes needing attention
    fn warning(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn accent(&self) -> String {
        self.style(Style::new().cyan()).to_string()
    }

    fn muted(&self) -> String {
        self.style(Style::new().dimmed()).to_string()
    }

    fn emphasis(&self) -> String {
        self.style(Style::new().bold()).to_string()
    }

    fn success(&self) -> String {
        self.style(Style::new().green()).to_string()
    }

    fn failure(&self) -> String {
        self.style(Style::new().red()).to_string()
    }

    fn warning(&self) -> String {
        self.style(Style::new().yellow()).to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    "✓".success()
}

/// Red cross
pub fn cross() -> String {
    "✗".failure()
}

/// Check or cross for a pass/fail value
pub fn mark(passed: bool) -> String {
    if passed { check() } else { cross() }
}
