use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_bool, resolve_index, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::ui::Alignment;
use crate::core::services::{ExpenseField, ExpenseService};

/// Which of the two expense collections a command targets. The fixed
/// and variable flows only differ in the payment-day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ExpenseKind {
    Fixed,
    Variable,
}

impl ExpenseKind {
    pub(super) fn noun(self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "fixed",
            ExpenseKind::Variable => "variable",
        }
    }

    pub(super) fn usage(self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "usage: fixed <add|edit|remove|list|paid>",
            ExpenseKind::Variable => "usage: variable <add|edit|remove|list|paid>",
        }
    }

    fn add_usage(self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "usage: fixed add <name> <amount> <day>",
            ExpenseKind::Variable => "usage: variable add <name> <amount>",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "fixed expense",
            ExpenseKind::Variable => "variable expense",
        }
    }

    fn title(self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "Fixed expenses",
            ExpenseKind::Variable => "Variable expenses",
        }
    }
}

pub(super) fn handle_add(
    context: &mut ShellContext,
    kind: ExpenseKind,
    args: &[&str],
) -> CommandResult {
    let (name, amount, day) = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(kind.add_usage().into()));
        }
        prompt_new_expense(context, kind)?
    } else {
        parse_add_args(kind, args)?
    };

    match kind {
        ExpenseKind::Fixed => {
            let day = day.unwrap_or_default();
            context
                .manager
                .try_with_record_mut(|record| ExpenseService::add_fixed(record, &name, amount, &day))?;
        }
        ExpenseKind::Variable => {
            context
                .manager
                .try_with_record_mut(|record| ExpenseService::add_variable(record, &name, amount))?;
        }
    }
    io::print_success(format!("Added {} `{}`.", kind.label(), name));
    Ok(())
}

pub(super) fn handle_edit(
    context: &mut ShellContext,
    kind: ExpenseKind,
    args: &[&str],
) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} edit <index> <field> <value>",
            kind.noun()
        )));
    }
    let id = expense_id_at(context, kind, args[0])?;
    let field = parse_expense_field(args[1], &args[2..].join(" "))?;
    apply_update(context, kind, id, field)?;
    io::print_success(format!("Updated {}.", kind.label()));
    Ok(())
}

pub(super) fn handle_remove(
    context: &mut ShellContext,
    kind: ExpenseKind,
    args: &[&str],
) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} remove <index>",
            kind.noun()
        )));
    }
    let id = expense_id_at(context, kind, args[0])?;
    match kind {
        ExpenseKind::Fixed => context
            .manager
            .try_with_record_mut(|record| ExpenseService::remove_fixed(record, id))?,
        ExpenseKind::Variable => context
            .manager
            .try_with_record_mut(|record| ExpenseService::remove_variable(record, id))?,
    }
    io::print_success(format!("Removed {}.", kind.label()));
    Ok(())
}

pub(super) fn handle_list(context: &mut ShellContext, kind: ExpenseKind) -> CommandResult {
    let record = context.manager.current();
    let (rows, total, unpaid) = match kind {
        ExpenseKind::Fixed => {
            let expenses = &record.fixed_expenses;
            let rows: Vec<Vec<String>> = expenses
                .iter()
                .enumerate()
                .map(|(index, expense)| {
                    vec![
                        (index + 1).to_string(),
                        expense.name.clone(),
                        context.format_amount(expense.amount),
                        expense.payment_date.clone(),
                        if expense.paid { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            let total: f64 = expenses.iter().map(|e| e.amount).sum();
            let unpaid: f64 = expenses.iter().filter(|e| !e.paid).map(|e| e.amount).sum();
            (rows, total, unpaid)
        }
        ExpenseKind::Variable => {
            let expenses = &record.variable_expenses;
            let rows: Vec<Vec<String>> = expenses
                .iter()
                .enumerate()
                .map(|(index, expense)| {
                    vec![
                        (index + 1).to_string(),
                        expense.name.clone(),
                        context.format_amount(expense.amount),
                        expense.payment_date.clone(),
                        if expense.paid { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            let total: f64 = expenses.iter().map(|e| e.amount).sum();
            let unpaid: f64 = expenses.iter().filter(|e| !e.paid).map(|e| e.amount).sum();
            (rows, total, unpaid)
        }
    };

    if rows.is_empty() {
        io::print_info(format!("No {}s this month.", kind.label()));
        return Ok(());
    }

    output::section(format!("{} for {}", kind.title(), record.key().label()));
    output::render_table_aligned(
        &["#", "Name", "Amount", "Day", "Paid"],
        &[
            Alignment::Right,
            Alignment::Left,
            Alignment::Right,
            Alignment::Right,
            Alignment::Left,
        ],
        &rows,
    );
    io::print_info(format!("Total: {}", context.format_amount(total)));
    if unpaid > 0.0 {
        io::print_info(format!(
            "Outstanding (unpaid): {}",
            context.format_amount(unpaid)
        ));
    }
    context.await_menu_escape()
}

pub(super) fn handle_paid(
    context: &mut ShellContext,
    kind: ExpenseKind,
    args: &[&str],
) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} paid <index>",
            kind.noun()
        )));
    }
    let id = expense_id_at(context, kind, args[0])?;
    let record = context.manager.current();
    let currently = match kind {
        ExpenseKind::Fixed => record
            .fixed_expenses
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.paid),
        ExpenseKind::Variable => record
            .variable_expenses
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.paid),
    }
    .unwrap_or(false);

    apply_update(context, kind, id, ExpenseField::Paid(!currently))?;
    io::print_success(if currently {
        "Marked as unpaid."
    } else {
        "Marked as paid."
    });
    Ok(())
}

fn apply_update(
    context: &mut ShellContext,
    kind: ExpenseKind,
    id: Uuid,
    field: ExpenseField,
) -> Result<(), CommandError> {
    match kind {
        ExpenseKind::Fixed => context
            .manager
            .try_with_record_mut(|record| ExpenseService::update_fixed(record, id, field))?,
        ExpenseKind::Variable => context
            .manager
            .try_with_record_mut(|record| ExpenseService::update_variable(record, id, field))?,
    }
    Ok(())
}

fn parse_add_args(
    kind: ExpenseKind,
    args: &[&str],
) -> Result<(String, f64, Option<String>), CommandError> {
    match kind {
        ExpenseKind::Fixed => {
            if args.len() != 3 {
                return Err(CommandError::InvalidArguments(kind.add_usage().into()));
            }
            Ok((
                args[0].to_string(),
                parse_amount(args[1])?,
                Some(args[2].to_string()),
            ))
        }
        ExpenseKind::Variable => {
            if args.len() != 2 {
                return Err(CommandError::InvalidArguments(kind.add_usage().into()));
            }
            Ok((args[0].to_string(), parse_amount(args[1])?, None))
        }
    }
}

fn prompt_new_expense(
    context: &ShellContext,
    kind: ExpenseKind,
) -> Result<(String, f64, Option<String>), CommandError> {
    let theme = &context.theme;
    let name = io::prompt_text(theme, "Name")?;
    let amount = io::prompt_amount(theme, "Amount")?;
    let day = match kind {
        ExpenseKind::Fixed => Some(io::prompt_text(theme, "Payment day (1-31)")?),
        ExpenseKind::Variable => None,
    };
    Ok((name, amount, day))
}

fn expense_id_at(
    context: &ShellContext,
    kind: ExpenseKind,
    raw: &str,
) -> Result<Uuid, CommandError> {
    let record = context.manager.current();
    match kind {
        ExpenseKind::Fixed => {
            let index = resolve_index(raw, record.fixed_expenses.len(), "fixed expense")?;
            Ok(record.fixed_expenses[index].id)
        }
        ExpenseKind::Variable => {
            let index = resolve_index(raw, record.variable_expenses.len(), "variable expense")?;
            Ok(record.variable_expenses[index].id)
        }
    }
}

fn parse_expense_field(field: &str, value: &str) -> Result<ExpenseField, CommandError> {
    match field.to_ascii_lowercase().as_str() {
        "name" => Ok(ExpenseField::Name(value.to_string())),
        "amount" => Ok(ExpenseField::Amount(parse_amount(value)?)),
        "day" | "date" => Ok(ExpenseField::PaymentDate(value.to_string())),
        "paid" => Ok(ExpenseField::Paid(parse_bool(value)?)),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown expense field `{}` (name, amount, day, paid)",
            other
        ))),
    }
}
