use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::menus::{expense_menu, menu_error_to_command_error};

use super::expense_handlers::{self, ExpenseKind};
use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "fixed",
            "Manage fixed monthly expenses",
            "fixed <add|edit|remove|list|paid> [...]",
            cmd_fixed,
        ),
        CommandDefinition::new(
            "variable",
            "Manage variable monthly expenses",
            "variable <add|edit|remove|list|paid> [...]",
            cmd_variable,
        ),
    ]
}

fn cmd_fixed(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run(context, args, ExpenseKind::Fixed)
}

fn cmd_variable(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    run(context, args, ExpenseKind::Variable)
}

fn run(context: &mut ShellContext, args: &[&str], kind: ExpenseKind) -> CommandResult {
    if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(kind.usage().into()));
        }
        let Some(choice) = expense_menu::show(kind.noun()).map_err(menu_error_to_command_error)?
        else {
            return Ok(());
        };
        return run_subcommand(context, kind, choice, &[]);
    }
    run_subcommand(context, kind, args[0], &args[1..])
}

fn run_subcommand(
    context: &mut ShellContext,
    kind: ExpenseKind,
    sub: &str,
    rest: &[&str],
) -> CommandResult {
    match sub.to_ascii_lowercase().as_str() {
        "add" => expense_handlers::handle_add(context, kind, rest),
        "edit" => expense_handlers::handle_edit(context, kind, rest),
        "remove" | "rm" => expense_handlers::handle_remove(context, kind, rest),
        "list" | "ls" => expense_handlers::handle_list(context, kind),
        "paid" => expense_handlers::handle_paid(context, kind, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown {} subcommand `{}`",
            kind.noun(),
            other
        ))),
    }
}
