use crate::cli::core::{
    parse_month_args, take_flag, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::ui::formatting::Formatter;
use crate::core::services::SummaryService;
use crate::domain::MonthKey;

pub(super) fn handle_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = parse_month_args(args)?.unwrap_or_else(MonthKey::current);
    let outcome = context.manager.open(target)?;
    context.finish_open(&outcome)
}

pub(super) fn handle_next(context: &mut ShellContext) -> CommandResult {
    let outcome = context.manager.next_month()?;
    context.finish_open(&outcome)
}

pub(super) fn handle_prev(context: &mut ShellContext) -> CommandResult {
    let outcome = context.manager.prev_month()?;
    context.finish_open(&outcome)
}

pub(super) fn handle_save(context: &mut ShellContext) -> CommandResult {
    let key = context.manager.save()?;
    io::print_success(format!("Saved {}.", key.label()));
    context.record_last_opened(key)
}

pub(super) fn handle_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, force) = take_flag(args, "--force");
    let target = parse_month_args(&rest)?.unwrap_or_else(|| context.manager.selected_key());
    let reopens = target == context.manager.selected_key();

    let prompt = format!("Delete all saved data for {}?", target.label());
    if !context.confirm_destructive(&prompt, force)? {
        io::print_info("Delete cancelled.");
        return Ok(());
    }

    context.manager.delete(target)?;
    if reopens {
        io::print_success(format!(
            "Deleted {}. The open month was reset to its defaults.",
            target.label()
        ));
    } else {
        io::print_success(format!("Deleted {}.", target.label()));
    }
    Ok(())
}

pub(super) fn handle_months(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, all) = take_flag(args, "--all");
    if !rest.is_empty() {
        return Err(CommandError::InvalidArguments("usage: months [--all]".into()));
    }

    let months = SummaryService::list_saved_months(context.manager.storage())?;
    if months.is_empty() {
        io::print_info("No saved months yet. Use `save` to store the open month.");
        return Ok(());
    }

    let selected_year = context.manager.selected_key().year;
    output::section("Saved months");
    for (year, keys) in SummaryService::group_by_year(&months) {
        let noun = if keys.len() == 1 { "month" } else { "months" };
        io::print_info(format!("{} ({} {})", year, keys.len(), noun));
        if !all && year != selected_year {
            continue;
        }
        for key in keys {
            match SummaryService::summarize(context.manager.storage(), key)? {
                Some(totals) => io::print_info(format!(
                    "  {}  income {}  expenses {}  profit {}",
                    key.label(),
                    context.format_amount(totals.total_income),
                    context.format_amount(totals.total_expenses),
                    context.format_signed_amount(totals.profit),
                )),
                None => io::print_info(format!("  {}  (unreadable)", key.label())),
            }
        }
    }
    if !all {
        io::print_hint("Pass --all to expand every year.");
    }
    context.await_menu_escape()
}

pub(super) fn handle_summary(context: &mut ShellContext) -> CommandResult {
    let record = context.manager.current();
    let totals = SummaryService::totals(record);

    let deals = record.commission_incomes.len();
    let received = record
        .commission_incomes
        .iter()
        .filter(|income| income.received)
        .count();
    let fixed_paid = record.fixed_expenses.iter().filter(|e| e.paid).count();
    let variable_paid = record.variable_expenses.iter().filter(|e| e.paid).count();
    let taxes_paid = record.taxes.iter().filter(|t| t.paid).count();

    let rows = vec![
        ("Base income".to_string(), context.format_amount(totals.base_income)),
        (
            format!("Commission income ({} deals, {} received)", deals, received),
            context.format_amount(totals.commission_income),
        ),
        ("Total income".to_string(), context.format_amount(totals.total_income)),
        (
            format!("Fixed expenses ({}/{} paid)", fixed_paid, record.fixed_expenses.len()),
            context.format_amount(totals.fixed_expenses),
        ),
        (
            format!(
                "Variable expenses ({}/{} paid)",
                variable_paid,
                record.variable_expenses.len()
            ),
            context.format_amount(totals.variable_expenses),
        ),
        (
            format!("Taxes ({}/{} paid)", taxes_paid, record.taxes.len()),
            context.format_amount(totals.taxes),
        ),
        (
            format!("Operational expenses ({})", record.operational_expenses.len()),
            context.format_amount(totals.operational_expenses),
        ),
        ("Total expenses".to_string(), context.format_amount(totals.total_expenses)),
        ("Profit".to_string(), context.format_signed_amount(totals.profit)),
    ];
    let refs: Vec<(&str, &str)> = rows
        .iter()
        .map(|(label, value)| (label.as_str(), value.as_str()))
        .collect();

    let formatter = Formatter::new();
    formatter.print_header(&format!("Summary for {}", record.key().label()));
    formatter.print_two_column(&refs);
    context.await_menu_escape()
}
