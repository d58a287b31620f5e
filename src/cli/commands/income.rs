use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::menus::{income_menu, menu_error_to_command_error};

use super::{income_handlers, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "income",
            "Manage base and commission income",
            "income <add|edit|remove|list|received|base> [...]",
            cmd_income,
        ),
        CommandDefinition::new(
            "calc",
            "Compute a brokerage fee without recording it",
            "calc <deposit> <monthly-rent> [other-fees] [--double]",
            cmd_calc,
        ),
    ]
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(
                "usage: income <add|edit|remove|list|received|base>".into(),
            ));
        }
        let Some(choice) = income_menu::show().map_err(menu_error_to_command_error)? else {
            return Ok(());
        };
        return run_subcommand(context, choice, &[]);
    }
    run_subcommand(context, args[0], &args[1..])
}

fn run_subcommand(context: &mut ShellContext, sub: &str, rest: &[&str]) -> CommandResult {
    match sub.to_ascii_lowercase().as_str() {
        "add" => income_handlers::handle_add(context, rest),
        "edit" => income_handlers::handle_edit(context, rest),
        "remove" | "rm" => income_handlers::handle_remove(context, rest),
        "list" | "ls" => income_handlers::handle_list(context),
        "received" => income_handlers::handle_received(context, rest),
        "base" => income_handlers::handle_base(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown income subcommand `{}`",
            other
        ))),
    }
}

fn cmd_calc(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    income_handlers::handle_calc(context, args)
}
