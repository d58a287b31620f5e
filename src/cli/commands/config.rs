use crate::cli::core::{take_flag, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::menus::{config_menu, menu_error_to_command_error};
use crate::cli::output;
use crate::cli::ui::formatting::Formatter;
use crate::currency::locale_preset;
use crate::domain::MonthKey;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "config",
        "View and manage tracker preferences",
        "config [show | set <key> <value> | backup [note] | backups | restore <name> [--force]]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return show_config(context);
        }
        let Some(choice) = config_menu::show().map_err(menu_error_to_command_error)? else {
            return Ok(());
        };
        return run_subcommand(context, choice, &[]);
    }
    run_subcommand(context, args[0], &args[1..])
}

fn run_subcommand(context: &mut ShellContext, sub: &str, rest: &[&str]) -> CommandResult {
    match sub.to_ascii_lowercase().as_str() {
        "show" => show_config(context),
        "set" => set_value(context, rest),
        "backup" => backup_config(context, rest),
        "backups" => list_backups(context),
        "restore" => restore_config(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &mut ShellContext) -> CommandResult {
    let retention = context.config.backup_retention.to_string();
    let last = context
        .config
        .last_opened_month
        .clone()
        .unwrap_or_else(|| "none".to_string());
    let data_dir = context.storage.base_dir().display().to_string();
    let config_path = context.config_manager.path().display().to_string();

    let rows = [
        ("Locale", context.config.locale.as_str()),
        ("Currency", context.config.currency.as_str()),
        ("Backup retention", retention.as_str()),
        ("Last opened month", last.as_str()),
        ("Data directory", data_dir.as_str()),
        ("Config file", config_path.as_str()),
    ];

    let formatter = Formatter::new();
    formatter.print_header("Configuration");
    formatter.print_two_column(&rows);
    Ok(())
}

fn set_value(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: config set <locale|currency|backup_retention|last_opened_month> <value>".into(),
        ));
    }
    let key = args[0].to_ascii_lowercase();
    let joined = args[1..].join(" ");
    let value = joined.trim();

    match key.as_str() {
        "locale" => {
            if locale_preset(value).is_none() {
                io::print_warning(format!(
                    "No formatting preset for `{}`; the default preset will be used.",
                    value
                ));
            }
            context.config.locale = value.to_string();
        }
        "currency" => {
            context.config.currency = value.to_uppercase();
        }
        "backup_retention" | "retention" => {
            let retention = value.parse::<usize>().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid retention `{}`", value))
            })?;
            context.config.backup_retention = retention;
            io::print_info("Record backup retention applies from the next start.");
        }
        "last_opened_month" => {
            if value.eq_ignore_ascii_case("none") {
                context.config.last_opened_month = None;
            } else {
                let month = MonthKey::parse_label(value).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "invalid month `{}` (use YYYY-MM)",
                        value
                    ))
                })?;
                context.config.last_opened_month = Some(month.label());
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`",
                other
            )))
        }
    }

    context.config_manager.save(&context.config)?;
    io::print_success(format!("Config `{}` updated.", key));
    Ok(())
}

fn backup_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };
    let name = context
        .config_manager
        .backup(&context.config, note.as_deref())?;
    io::print_success(format!("Configuration backed up as `{}`.", name));
    Ok(())
}

fn list_backups(context: &mut ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups yet.");
        return Ok(());
    }
    output::section("Configuration backups");
    for name in backups {
        io::print_info(format!("  {}", name));
    }
    Ok(())
}

fn restore_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, force) = take_flag(args, "--force");
    if rest.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: config restore <name> [--force]".into(),
        ));
    }
    let name = rest[0];

    let prompt = format!("Replace the current configuration with `{}`?", name);
    if !context.confirm_destructive(&prompt, force)? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }

    let restored = context.config_manager.restore(name)?;
    context.config = restored;
    context.config_manager.save(&context.config)?;
    io::print_success(format!("Configuration restored from `{}`.", name));
    Ok(())
}
