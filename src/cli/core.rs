//! Core CLI loop, dispatch, and shell context helpers.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    core::services::ServiceError,
    core::{LoadOutcome, RecordManager},
    currency::{
        format_currency_value, format_date, format_signed, locale_preset, CurrencyCode,
        FormatOptions, LocaleConfig,
    },
    domain::MonthKey,
    errors::LedgerError,
    storage::json_backend::JsonStore,
};

use super::commands::{self, CommandRegistry};
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::ui::banner::Banner;
use super::ui::formatting::Formatter;
use super::ui::prompts;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        if mode == CliMode::Script {
            output::set_preferences(OutputPreferences {
                plain_mode: true,
                quiet_mode: false,
            });
        }
        let config_manager = ConfigManager::new()?;
        Self::build(mode, config_manager, None)
    }

    #[cfg(test)]
    pub(crate) fn with_base_dir(mode: CliMode, base: &std::path::Path) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base.join("config"))?;
        Self::build(mode, config_manager, Some(base.join("store")))
    }

    fn build(
        mode: CliMode,
        config_manager: ConfigManager,
        store_root: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let storage = JsonStore::new(store_root, Some(config.backup_retention))?;
        let manager = RecordManager::new(Box::new(storage.clone()));
        let registry = CommandRegistry::new(commands::all_definitions());

        let mut context = ShellContext {
            mode,
            registry,
            manager,
            storage,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.open_startup_month();
        Ok(context)
    }

    /// Reopens the month recorded in the config, falling back to the
    /// current calendar month. Never fails startup; a refused record
    /// leaves the seeded default in place with a warning.
    fn open_startup_month(&mut self) {
        let target = self
            .config
            .last_opened_month
            .as_deref()
            .and_then(MonthKey::parse_label)
            .unwrap_or_else(MonthKey::current);
        match self.manager.open(target) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    cli_io::print_warning(warning);
                }
                if self.mode == CliMode::Interactive {
                    cli_io::print_info(format!("Tracking {}.", outcome.key.label()));
                }
            }
            Err(err) => {
                cli_io::print_warning(format!("Could not open {}: {}", target.label(), err));
            }
        }
    }

    /// Shared tail of every month selection: surface decode warnings,
    /// announce the result, and remember the month for the next start.
    pub(crate) fn finish_open(&mut self, outcome: &LoadOutcome) -> CommandResult {
        for warning in &outcome.warnings {
            cli_io::print_warning(warning);
        }
        let source = if outcome.existed {
            "saved data"
        } else {
            "a fresh record"
        };
        cli_io::print_success(format!("Opened {} from {}.", outcome.key.label(), source));
        self.record_last_opened(outcome.key)
    }

    pub(crate) fn record_last_opened(&mut self, key: MonthKey) -> CommandResult {
        let label = key.label();
        if self.config.last_opened_month.as_deref() == Some(label.as_str()) {
            return Ok(());
        }
        self.config.last_opened_month = Some(label);
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let handler = self.registry.get(command).map(|definition| definition.handler);
        if let Some(handler) = handler {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&command, &tokens[0], &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!("{} ", Banner::text(self))
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        let prompt = if self.manager.is_dirty() {
            "Unsaved changes will be lost. Exit anyway?"
        } else {
            "Exit the tracker?"
        };
        cli_io::confirm_action(&self.theme, prompt, false).map_err(CliError::from)
    }

    /// Gate for operations that discard stored data. Script mode never
    /// prompts; it demands an explicit `--force` instead.
    pub(crate) fn confirm_destructive(
        &self,
        prompt: &str,
        force: bool,
    ) -> Result<bool, CommandError> {
        if force {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => Err(CommandError::InvalidArguments(
                "pass --force to run destructive commands in script mode".into(),
            )),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                self.print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn print_hint(&self, message: &str) {
        cli_io::print_hint(message);
    }

    pub(crate) fn await_menu_escape(&self) -> CommandResult {
        if self.mode != CliMode::Interactive {
            return Ok(());
        }
        Formatter::new().print_detail("Press ESC to return to the shell.");
        prompts::wait_for_escape().map_err(CommandError::Io)
    }

    fn locale_config(&self) -> LocaleConfig {
        locale_preset(&self.config.locale).unwrap_or_default()
    }

    pub(crate) fn format_amount(&self, amount: f64) -> String {
        let currency = CurrencyCode::new(&self.config.currency);
        format_currency_value(
            amount,
            &currency,
            &self.locale_config(),
            &FormatOptions::default(),
        )
    }

    /// Profit rendering with an explicit sign, `+240,000원` style.
    pub(crate) fn format_signed_amount(&self, amount: f64) -> String {
        let currency = CurrencyCode::new(&self.config.currency);
        format_signed(amount, &currency, &self.locale_config())
    }

    pub(crate) fn format_date(&self, date: NaiveDate) -> String {
        format_date(&self.locale_config(), date)
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    let value = cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", raw)))?;
    if !value.is_finite() {
        return Err(CommandError::InvalidArguments(format!(
            "invalid amount `{}`",
            raw
        )));
    }
    Ok(value)
}

/// Accepts no month (caller picks a default), a `YYYY-MM` label, or a
/// `<year> <month>` pair.
pub(crate) fn parse_month_args(args: &[&str]) -> Result<Option<MonthKey>, CommandError> {
    match args.len() {
        0 => Ok(None),
        1 => MonthKey::parse_label(args[0]).map(Some).ok_or_else(|| {
            CommandError::InvalidArguments(format!(
                "invalid month `{}` (use YYYY-MM or `<year> <month>`)",
                args[0]
            ))
        }),
        2 => {
            let year = args[0].parse::<i32>().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid year `{}`", args[0]))
            })?;
            let month = args[1].parse::<u32>().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid month `{}`", args[1]))
            })?;
            if !(1..=12).contains(&month) {
                return Err(CommandError::InvalidArguments(format!(
                    "month {} is out of range (1-12)",
                    month
                )));
            }
            Ok(Some(MonthKey::new(year, month)))
        }
        _ => Err(CommandError::InvalidArguments(
            "expected `YYYY-MM` or `<year> <month>`".into(),
        )),
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_bool(raw: &str) -> Result<bool, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" | "1" => Ok(true),
        "no" | "n" | "false" | "off" | "0" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected yes/no, got `{}`",
            other
        ))),
    }
}

/// Maps a 1-based index from a list screen to a vector position.
pub(crate) fn resolve_index(raw: &str, len: usize, what: &str) -> Result<usize, CommandError> {
    if len == 0 {
        return Err(CommandError::InvalidArguments(format!(
            "no {} entries to pick from",
            what
        )));
    }
    let index = raw.parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!("{} index must be a number", what))
    })?;
    if index == 0 || index > len {
        return Err(CommandError::InvalidArguments(format!(
            "{} index {} is out of range (1-{})",
            what, index, len
        )));
    }
    Ok(index - 1)
}

/// Splits a flag like `--force` out of the argument list.
pub(crate) fn take_flag<'a>(args: &[&'a str], flag: &str) -> (Vec<&'a str>, bool) {
    let mut found = false;
    let mut rest = Vec::with_capacity(args.len());
    for arg in args {
        if arg.eq_ignore_ascii_case(flag) {
            found = true;
        } else {
            rest.push(*arg);
        }
    }
    (rest, found)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Ledger(err),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Command(String),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base)?;
    for line in lines {
        match app.process_line(line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStore;
    use tempfile::tempdir;

    #[test]
    fn parse_line_handles_quotes() {
        let tokens =
            crate::cli::shell::parse_command_line("income add \"Kim Minsu\" 10000000 500000")
                .unwrap();
        assert_eq!(tokens, vec!["income", "add", "Kim Minsu", "10000000", "500000"]);
    }

    #[test]
    fn parse_amount_strips_separators() {
        assert_eq!(parse_amount("2,500,000").unwrap(), 2_500_000.0);
        assert_eq!(parse_amount("1_000").unwrap(), 1_000.0);
        assert_eq!(parse_amount("-35000").unwrap(), -35_000.0);
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("nan").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn parse_month_args_accepts_both_forms() {
        assert_eq!(parse_month_args(&[]).unwrap(), None);
        assert_eq!(
            parse_month_args(&["2024-7"]).unwrap(),
            Some(MonthKey::new(2024, 7))
        );
        assert_eq!(
            parse_month_args(&["2024", "7"]).unwrap(),
            Some(MonthKey::new(2024, 7))
        );
        assert!(parse_month_args(&["2024", "13"]).is_err());
        assert!(parse_month_args(&["soon"]).is_err());
        assert!(parse_month_args(&["2024", "7", "extra"]).is_err());
    }

    #[test]
    fn resolve_index_is_one_based() {
        assert_eq!(resolve_index("2", 5, "income").unwrap(), 1);
        assert!(resolve_index("0", 5, "income").is_err());
        assert!(resolve_index("6", 5, "income").is_err());
        assert!(resolve_index("2", 0, "income").is_err());
        assert!(resolve_index("two", 5, "income").is_err());
    }

    #[test]
    fn take_flag_is_position_independent() {
        let (rest, force) = take_flag(&["2024", "--force", "7"], "--force");
        assert_eq!(rest, vec!["2024", "7"]);
        assert!(force);

        let (rest, force) = take_flag(&["2024", "7"], "--force");
        assert_eq!(rest, vec!["2024", "7"]);
        assert!(!force);
    }

    #[test]
    fn script_edit_and_save_persists_the_record() {
        let temp = tempdir().expect("tempdir");
        let context = process_script(
            temp.path(),
            &[
                "open 2024 7",
                "income base 2,500,000",
                "fixed add \"Office rent\" 500000 25",
                "save",
            ],
        )
        .expect("script");
        assert_eq!(context.manager.current().income, 2_500_000.0);
        assert_eq!(context.manager.current().fixed_expenses.len(), 7);
        assert!(!context.manager.is_dirty());

        let store = JsonStore::new(Some(temp.path().join("store")), Some(3)).expect("store");
        let raw = store
            .get("monthlyData-2024-7")
            .expect("get")
            .expect("record saved");
        assert!(raw.contains("Office rent"));
    }

    #[test]
    fn script_destructive_commands_require_force() {
        let temp = tempdir().expect("tempdir");
        let err = process_script(temp.path(), &["open 2024 7", "save", "delete-month"])
            .expect_err("unforced delete");
        assert!(err.to_string().contains("--force"));

        process_script(temp.path(), &["open 2024 7", "delete-month --force"])
            .expect("forced delete");
        let store = JsonStore::new(Some(temp.path().join("store")), Some(3)).expect("store");
        assert!(store.get("monthlyData-2024-7").expect("get").is_none());
    }

    #[test]
    fn exit_stops_the_script() {
        let temp = tempdir().expect("tempdir");
        process_script(temp.path(), &["open 2024 7", "exit", "save"]).expect("script");
        let store = JsonStore::new(Some(temp.path().join("store")), Some(3)).expect("store");
        assert!(store.get("monthlyData-2024-7").expect("get").is_none());
    }

    #[test]
    fn startup_reopens_the_last_month() {
        let temp = tempdir().expect("tempdir");
        process_script(temp.path(), &["open 2023 11"]).expect("first run");
        let context = process_script(temp.path(), &[]).expect("second run");
        assert_eq!(context.manager.selected_key(), MonthKey::new(2023, 11));
    }

    #[test]
    fn unknown_commands_do_not_abort() {
        let temp = tempdir().expect("tempdir");
        process_script(temp.path(), &["opne 2024 7", "open 2024 7"]).expect("script");
    }
}
