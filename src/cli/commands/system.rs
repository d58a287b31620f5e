use crate::cli::core::{take_flag, CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::menus::main_menu::MainMenu;
use crate::cli::menus::menu_error_to_command_error;
use crate::cli::output::section as output_section;
use crate::cli::ui::banner::Banner;
use crate::domain::{MonthKey, CURRENT_SCHEMA_VERSION, TEMPLATES_KEY};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "menu",
            "Browse commands in a selection menu",
            "menu",
            cmd_menu,
        ),
        CommandDefinition::new(
            "backups",
            "List stored backups for a month or the templates",
            "backups <YYYY-MM|templates>",
            cmd_backups,
        ),
        CommandDefinition::new(
            "restore",
            "Restore a month or the templates from a backup",
            "restore <YYYY-MM|templates> <backup-file> [--force]",
            cmd_restore,
        ),
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("exit", "Exit the tracker", "exit", cmd_exit),
    ]
}

fn cmd_menu(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.is_interactive() {
        return Err(CommandError::InvalidArguments(
            "the menu is only available in interactive mode".into(),
        ));
    }

    let banner = Banner::text(context);
    let catalog = context.command_names();
    let mut menu = MainMenu::new();
    let Some(line) = menu
        .show(&banner, &catalog)
        .map_err(menu_error_to_command_error)?
    else {
        return Ok(());
    };

    let tokens = crate::cli::shell::parse_command_line(&line)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    if tokens.is_empty() {
        return Ok(());
    }
    let command = tokens[0].to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    match context.dispatch(&command, &tokens[0], &args)? {
        LoopControl::Continue => Ok(()),
        LoopControl::Exit => Err(CommandError::ExitRequested),
    }
}

fn cmd_backups(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: backups <YYYY-MM|templates>".into(),
        ));
    }
    let key = resolve_store_key(args[0]);
    let backups = context.storage.list_backups(&key)?;
    if backups.is_empty() {
        io::print_info(format!("No backups recorded for `{}`.", args[0]));
        return Ok(());
    }

    output_section(format!("Backups for {}", args[0]));
    for name in backups {
        io::print_info(format!("  {}", name));
    }
    io::print_hint("Restore one with `restore <target> <backup-file>`.");
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, force) = take_flag(args, "--force");
    if rest.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: restore <YYYY-MM|templates> <backup-file> [--force]".into(),
        ));
    }
    let key = resolve_store_key(rest[0]);
    let backup_name = rest[1];

    let prompt = format!("Overwrite `{}` with backup `{}`?", rest[0], backup_name);
    if !context.confirm_destructive(&prompt, force)? {
        io::print_info("Restore cancelled.");
        return Ok(());
    }

    context.storage.restore(&key, backup_name)?;
    io::print_success(format!("Restored `{}` from `{}`.", rest[0], backup_name));

    // The open month must reflect the restored bytes, not stale memory.
    if key == context.manager.selected_key().storage_key() {
        let outcome = context.manager.open(context.manager.selected_key())?;
        context.finish_open(&outcome)?;
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        if let Some(definition) = context.registry.get(&name) {
            help::print_command(definition);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output_section(format!("Office Ledger {}", env!("CARGO_PKG_VERSION")));
    io::print_info(format!("  Record schema : v{}", CURRENT_SCHEMA_VERSION));
    io::print_info(format!(
        "  Data directory: {}",
        context.storage.base_dir().display()
    ));
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.is_interactive() && context.manager.is_dirty() {
        let confirmed = io::confirm_action(
            &context.theme,
            "Unsaved changes will be lost. Exit anyway?",
            false,
        )?;
        if !confirmed {
            return Ok(());
        }
    }
    Err(CommandError::ExitRequested)
}

fn resolve_store_key(raw: &str) -> String {
    if raw.eq_ignore_ascii_case("templates") {
        return TEMPLATES_KEY.to_string();
    }
    match MonthKey::parse_label(raw) {
        Some(month) => month.storage_key(),
        None => raw.to_string(),
    }
}
