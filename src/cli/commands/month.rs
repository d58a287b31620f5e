use crate::cli::core::{CommandResult, ShellContext};

use super::{month_handlers, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "open",
            "Open a month for editing",
            "open [YYYY-MM | <year> <month>]",
            cmd_open,
        ),
        CommandDefinition::new("next", "Move to the next month", "next", cmd_next),
        CommandDefinition::new("prev", "Move to the previous month", "prev", cmd_prev),
        CommandDefinition::new("save", "Save the open month", "save", cmd_save),
        CommandDefinition::new(
            "delete-month",
            "Delete a saved month record",
            "delete-month [YYYY-MM | <year> <month>] [--force]",
            cmd_delete_month,
        ),
        CommandDefinition::new(
            "months",
            "List saved months grouped by year",
            "months [--all]",
            cmd_months,
        ),
        CommandDefinition::new(
            "summary",
            "Show totals and profit for the open month",
            "summary",
            cmd_summary,
        ),
    ]
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    month_handlers::handle_open(context, args)
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    month_handlers::handle_next(context)
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    month_handlers::handle_prev(context)
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    month_handlers::handle_save(context)
}

fn cmd_delete_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    month_handlers::handle_delete(context, args)
}

fn cmd_months(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    month_handlers::handle_months(context, args)
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    month_handlers::handle_summary(context)
}
