//! Terminal styling helpers

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream, Style};

/// Check mark shown on success
pub const CHECK: &str = "✓";

/// Semantic colors for CLI output
pub trait Stylize {
    /// Secondary information
    fn muted(&self) -> String;
    /// Names the user should notice (branches, remotes)
    fn accent(&self) -> String;
    /// Headings and status lines
    fn emphasis(&self) -> String;
    /// Command trace lines
    fn command(&self) -> String;
    /// Warnings
    fn warn(&self) -> String;
    /// Success messages
    fn success(&self) -> String;
    /// Errors
    fn error(&self) -> String;
}

impl<T: std::fmt::Display> Stylize for T {
    fn muted(&self) -> String {
        styled(self, Style::new().dimmed())
    }

    fn accent(&self) -> String {
        styled(self, Style::new().cyan())
    }

    fn emphasis(&self) -> String {
        styled(self, Style::new().bold())
    }

    fn command(&self) -> String {
        styled(self, Style::new().yellow())
    }

    fn warn(&self) -> String {
        styled(self, Style::new().yellow().bold())
    }

    fn success(&self) -> String {
        styled(self, Style::new().green())
    }

    fn error(&self) -> String {
        styled(self, Style::new().red().bold())
    }
}

fn styled<T: std::fmt::Display>(value: &T, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |v| v.style(style))
        .to_string()
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Spinner used while waiting on the network
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Clickable link when the terminal supports it, plain text otherwise
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}
