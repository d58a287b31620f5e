use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_date, resolve_index, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::ui::Alignment;
use crate::core::services::{OperationalField, OperationalService};
use crate::domain::OperationalCategory;

const ADD_USAGE: &str = "usage: op add <description> <amount> [category] [date]";

pub(super) fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (description, amount, category, date) = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        prompt_operational(context)?
    } else {
        parse_add_args(args)?
    };

    context.manager.try_with_record_mut(|record| {
        OperationalService::add(record, date, &description, amount, category)
    })?;
    io::print_success(format!("Added operational expense `{}`.", description));
    Ok(())
}

pub(super) fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: op edit <index> <field> <value>".into(),
        ));
    }
    let id = operational_id_at(context, args[0])?;
    let field = parse_operational_field(args[1], &args[2..].join(" "))?;
    context
        .manager
        .try_with_record_mut(|record| OperationalService::update(record, id, field))?;
    io::print_success("Operational expense updated.");
    Ok(())
}

pub(super) fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: op remove <index>".into(),
        ));
    }
    let id = operational_id_at(context, args[0])?;
    context
        .manager
        .try_with_record_mut(|record| OperationalService::remove(record, id))?;
    io::print_success("Removed operational expense.");
    Ok(())
}

pub(super) fn handle_list(context: &mut ShellContext) -> CommandResult {
    let record = context.manager.current();
    if record.operational_expenses.is_empty() {
        io::print_info("No operational expenses this month.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = record
        .operational_expenses
        .iter()
        .enumerate()
        .map(|(index, expense)| {
            vec![
                (index + 1).to_string(),
                context.format_date(expense.date),
                expense.description.clone(),
                expense.category.label().to_string(),
                context.format_amount(expense.amount),
            ]
        })
        .collect();

    output::section(format!(
        "Operational expenses for {}",
        record.key().label()
    ));
    output::render_table_aligned(
        &["#", "Date", "Description", "Category", "Amount"],
        &[
            Alignment::Right,
            Alignment::Left,
            Alignment::Left,
            Alignment::Left,
            Alignment::Right,
        ],
        &rows,
    );

    let total: f64 = record.operational_expenses.iter().map(|e| e.amount).sum();
    io::print_info(format!("Total: {}", context.format_amount(total)));
    for category in OperationalCategory::all() {
        let subtotal: f64 = record
            .operational_expenses
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.amount)
            .sum();
        if subtotal > 0.0 {
            io::print_info(format!(
                "  {}: {}",
                category.label(),
                context.format_amount(subtotal)
            ));
        }
    }
    context.await_menu_escape()
}

fn parse_add_args(
    args: &[&str],
) -> Result<(String, f64, OperationalCategory, NaiveDate), CommandError> {
    if args.len() < 2 || args.len() > 4 {
        return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
    }
    let description = args[0].to_string();
    let amount = parse_amount(args[1])?;
    let category = args
        .get(2)
        .map(|raw| parse_category(raw))
        .transpose()?
        .unwrap_or_default();
    let date = args
        .get(3)
        .map(|raw| parse_date(raw))
        .transpose()?
        .unwrap_or_else(|| Local::now().date_naive());
    Ok((description, amount, category, date))
}

fn prompt_operational(
    context: &ShellContext,
) -> Result<(String, f64, OperationalCategory, NaiveDate), CommandError> {
    let theme = &context.theme;
    let description = io::prompt_text(theme, "Description")?;
    let amount = io::prompt_amount(theme, "Amount")?;
    let category_raw =
        io::prompt_optional(theme, "Category equipment/advertising/maintenance/other")?;
    let category = if category_raw.trim().is_empty() {
        OperationalCategory::default()
    } else {
        parse_category(&category_raw)?
    };
    let date_raw = io::prompt_optional(theme, "Date YYYY-MM-DD (default today)")?;
    let date = if date_raw.trim().is_empty() {
        Local::now().date_naive()
    } else {
        parse_date(date_raw.trim())?
    };
    Ok((description, amount, category, date))
}

fn operational_id_at(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let expenses = &context.manager.current().operational_expenses;
    let index = resolve_index(raw, expenses.len(), "operational expense")?;
    Ok(expenses[index].id)
}

fn parse_operational_field(field: &str, value: &str) -> Result<OperationalField, CommandError> {
    match field.to_ascii_lowercase().as_str() {
        "date" => Ok(OperationalField::Date(parse_date(value)?)),
        "desc" | "description" => Ok(OperationalField::Description(value.to_string())),
        "amount" => Ok(OperationalField::Amount(parse_amount(value)?)),
        "category" => Ok(OperationalField::Category(parse_category(value)?)),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown op field `{}` (date, description, amount, category)",
            other
        ))),
    }
}

fn parse_category(raw: &str) -> Result<OperationalCategory, CommandError> {
    OperationalCategory::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown category `{}` (equipment, advertising, maintenance, other)",
            raw
        ))
    })
}
