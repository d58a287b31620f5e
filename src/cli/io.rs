use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::{parse_amount, CommandError};
use crate::cli::output;

pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Secondary guidance line printed under an error or list.
pub fn print_hint(message: impl fmt::Display) {
    output::prompt(message);
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt the user for free-form text input.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()
        .map_err(CommandError::from)
}

/// Prompt where an empty answer means "skip".
pub fn prompt_optional(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

pub fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CommandError> {
    let raw = prompt_text(theme, prompt)?;
    parse_amount(&raw)
}

/// Amount prompt that falls back to `default` on an empty answer.
pub fn prompt_amount_or(
    theme: &ColorfulTheme,
    prompt: &str,
    default: f64,
) -> Result<f64, CommandError> {
    let raw = prompt_optional(theme, prompt)?;
    if raw.trim().is_empty() {
        return Ok(default);
    }
    parse_amount(&raw)
}
