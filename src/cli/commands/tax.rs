use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::menus::{menu_error_to_command_error, tax_menu};

use super::{tax_handlers, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "tax",
        "Manage tax entries for the open month",
        "tax <add|edit|remove|list|paid> [...]",
        cmd_tax,
    )]
}

fn cmd_tax(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(
                "usage: tax <add|edit|remove|list|paid>".into(),
            ));
        }
        let Some(choice) = tax_menu::show().map_err(menu_error_to_command_error)? else {
            return Ok(());
        };
        return run_subcommand(context, choice, &[]);
    }
    run_subcommand(context, args[0], &args[1..])
}

fn run_subcommand(context: &mut ShellContext, sub: &str, rest: &[&str]) -> CommandResult {
    match sub.to_ascii_lowercase().as_str() {
        "add" => tax_handlers::handle_add(context, rest),
        "edit" => tax_handlers::handle_edit(context, rest),
        "remove" | "rm" => tax_handlers::handle_remove(context, rest),
        "list" | "ls" => tax_handlers::handle_list(context),
        "paid" => tax_handlers::handle_paid(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown tax subcommand `{}`",
            other
        ))),
    }
}
