use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Info,
    Detail,
    Success,
    Warning,
    Error,
}

/// Screen-level formatting for headers, detail lines, and label/value
/// layouts. Message-kind printing lives in `cli::output`.
pub struct Formatter {
    prefs: OutputPreferences,
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.colorize(format!("=== {} ===", title), Style::Header)
    }

    pub fn print_info(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Info, message));
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Detail, message));
    }

    pub fn print_success(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Success, message));
    }

    pub fn print_warning(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Warning, message));
    }

    pub fn print_error(&self, message: impl fmt::Display) {
        println!("{}", self.apply_style(Style::Error, message));
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        match style {
            Style::Success => self.decorate("✔", "OK:", message, style),
            Style::Warning => self.decorate("⚠", "WARNING:", message, style),
            Style::Error => self.decorate("✖", "ERROR:", message, style),
            Style::Header => self.colorize(format!("=== {} ===", message), style),
            Style::Info | Style::Detail => message.to_string(),
        }
    }

    fn decorate(
        &self,
        icon: &str,
        plain_label: &str,
        message: impl fmt::Display,
        style: Style,
    ) -> String {
        if self.prefs.plain_mode {
            format!("{plain_label} {}", message)
        } else {
            self.colorize(format!("{icon} {}", message), style)
        }
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if self.prefs.plain_mode {
            return text;
        }
        match style {
            Style::Success => text.green().to_string(),
            Style::Warning => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
            Style::Header => text.bold().to_string(),
            Style::Info | Style::Detail => text,
        }
    }

    pub fn print_two_column(&self, entries: &[(&str, &str)]) {
        if entries.is_empty() {
            return;
        }
        let label_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        for (label, description) in entries {
            println!(
                "  {:<width$}  {}",
                label,
                description,
                width = label_width + 2
            );
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}
