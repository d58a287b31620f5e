use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::menus::{menu_error_to_command_error, template_menu};

use super::{template_handlers, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "template",
        "Manage reusable fixed-expense templates",
        "template <add|edit|remove|list|apply> [...]",
        cmd_template,
    )]
}

fn cmd_template(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(
                "usage: template <add|edit|remove|list|apply>".into(),
            ));
        }
        let Some(choice) = template_menu::show().map_err(menu_error_to_command_error)? else {
            return Ok(());
        };
        return run_subcommand(context, choice, &[]);
    }
    run_subcommand(context, args[0], &args[1..])
}

fn run_subcommand(context: &mut ShellContext, sub: &str, rest: &[&str]) -> CommandResult {
    match sub.to_ascii_lowercase().as_str() {
        "add" => template_handlers::handle_add(context, rest),
        "edit" => template_handlers::handle_edit(context, rest),
        "remove" | "rm" => template_handlers::handle_remove(context, rest),
        "list" | "ls" => template_handlers::handle_list(context),
        "apply" => template_handlers::handle_apply(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown template subcommand `{}`",
            other
        ))),
    }
}
