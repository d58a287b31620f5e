use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::menus::{menu_error_to_command_error, operational_menu};

use super::{operational_handlers, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "op",
        "Manage one-off operational expenses",
        "op <add|edit|remove|list> [...]",
        cmd_op,
    )]
}

fn cmd_op(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(
                "usage: op <add|edit|remove|list>".into(),
            ));
        }
        let Some(choice) = operational_menu::show().map_err(menu_error_to_command_error)? else {
            return Ok(());
        };
        return run_subcommand(context, choice, &[]);
    }
    run_subcommand(context, args[0], &args[1..])
}

fn run_subcommand(context: &mut ShellContext, sub: &str, rest: &[&str]) -> CommandResult {
    match sub.to_ascii_lowercase().as_str() {
        "add" => operational_handlers::handle_add(context, rest),
        "edit" => operational_handlers::handle_edit(context, rest),
        "remove" | "rm" => operational_handlers::handle_remove(context, rest),
        "list" | "ls" => operational_handlers::handle_list(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown op subcommand `{}`",
            other
        ))),
    }
}
