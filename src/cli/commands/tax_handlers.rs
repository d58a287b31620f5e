use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_bool, resolve_index, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::ui::Alignment;
use crate::core::services::{TaxField, TaxService};

const ADD_USAGE: &str = "usage: tax add <name> <amount> [quarter] [year]";

pub(super) fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let selected_year = context.manager.selected_key().year;
    let (name, amount, quarter, year) = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        prompt_tax(context, selected_year)?
    } else {
        parse_add_args(args, selected_year)?
    };

    context
        .manager
        .try_with_record_mut(|record| TaxService::add(record, &name, amount, year, quarter))?;
    io::print_success(format!("Added tax `{}`.", name));
    Ok(())
}

pub(super) fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: tax edit <index> <field> <value>".into(),
        ));
    }
    let id = tax_id_at(context, args[0])?;
    let field = parse_tax_field(args[1], &args[2..].join(" "))?;
    context
        .manager
        .try_with_record_mut(|record| TaxService::update(record, id, field))?;
    io::print_success("Tax updated.");
    Ok(())
}

pub(super) fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: tax remove <index>".into(),
        ));
    }
    let id = tax_id_at(context, args[0])?;
    context
        .manager
        .try_with_record_mut(|record| TaxService::remove(record, id))?;
    io::print_success("Removed tax.");
    Ok(())
}

pub(super) fn handle_list(context: &mut ShellContext) -> CommandResult {
    let record = context.manager.current();
    if record.taxes.is_empty() {
        io::print_info("No taxes this month.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = record
        .taxes
        .iter()
        .enumerate()
        .map(|(index, tax)| {
            vec![
                (index + 1).to_string(),
                tax.name.clone(),
                context.format_amount(tax.amount),
                tax.year.to_string(),
                tax.quarter.map(|q| format!("Q{q}")).unwrap_or_default(),
                if tax.paid { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    output::section(format!("Taxes for {}", record.key().label()));
    output::render_table_aligned(
        &["#", "Name", "Amount", "Year", "Quarter", "Paid"],
        &[
            Alignment::Right,
            Alignment::Left,
            Alignment::Right,
            Alignment::Right,
            Alignment::Left,
            Alignment::Left,
        ],
        &rows,
    );

    let total: f64 = record.taxes.iter().map(|t| t.amount).sum();
    let unpaid: f64 = record
        .taxes
        .iter()
        .filter(|t| !t.paid)
        .map(|t| t.amount)
        .sum();
    io::print_info(format!("Total: {}", context.format_amount(total)));
    if unpaid > 0.0 {
        io::print_info(format!(
            "Outstanding (unpaid): {}",
            context.format_amount(unpaid)
        ));
    }
    context.await_menu_escape()
}

pub(super) fn handle_paid(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: tax paid <index>".into(),
        ));
    }
    let id = tax_id_at(context, args[0])?;
    let currently = context
        .manager
        .current()
        .taxes
        .iter()
        .find(|tax| tax.id == id)
        .map(|tax| tax.paid)
        .unwrap_or(false);
    context
        .manager
        .try_with_record_mut(|record| TaxService::update(record, id, TaxField::Paid(!currently)))?;
    io::print_success(if currently {
        "Marked as unpaid."
    } else {
        "Marked as paid."
    });
    Ok(())
}

fn parse_add_args(
    args: &[&str],
    default_year: i32,
) -> Result<(String, f64, Option<u8>, i32), CommandError> {
    if args.len() < 2 || args.len() > 4 {
        return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
    }
    let name = args[0].to_string();
    let amount = parse_amount(args[1])?;
    let quarter = args.get(2).map(|raw| parse_quarter(raw)).transpose()?;
    let year = args
        .get(3)
        .map(|raw| {
            raw.parse::<i32>()
                .map_err(|_| CommandError::InvalidArguments(format!("invalid year `{}`", raw)))
        })
        .transpose()?
        .unwrap_or(default_year);
    Ok((name, amount, quarter, year))
}

fn prompt_tax(
    context: &ShellContext,
    default_year: i32,
) -> Result<(String, f64, Option<u8>, i32), CommandError> {
    let theme = &context.theme;
    let name = io::prompt_text(theme, "Tax name")?;
    let amount = io::prompt_amount(theme, "Amount")?;
    let quarter_raw = io::prompt_optional(theme, "Quarter 1-4 (optional)")?;
    let quarter = if quarter_raw.trim().is_empty() {
        None
    } else {
        Some(parse_quarter(&quarter_raw)?)
    };
    let year_raw = io::prompt_optional(theme, &format!("Year (default {})", default_year))?;
    let year = if year_raw.trim().is_empty() {
        default_year
    } else {
        year_raw
            .trim()
            .parse::<i32>()
            .map_err(|_| CommandError::InvalidArguments(format!("invalid year `{}`", year_raw)))?
    };
    Ok((name, amount, quarter, year))
}

fn tax_id_at(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let taxes = &context.manager.current().taxes;
    let index = resolve_index(raw, taxes.len(), "tax")?;
    Ok(taxes[index].id)
}

fn parse_tax_field(field: &str, value: &str) -> Result<TaxField, CommandError> {
    match field.to_ascii_lowercase().as_str() {
        "name" => Ok(TaxField::Name(value.to_string())),
        "amount" => Ok(TaxField::Amount(parse_amount(value)?)),
        "year" => value
            .trim()
            .parse::<i32>()
            .map(TaxField::Year)
            .map_err(|_| CommandError::InvalidArguments(format!("invalid year `{}`", value))),
        "quarter" => {
            if value.eq_ignore_ascii_case("none") {
                Ok(TaxField::Quarter(None))
            } else {
                Ok(TaxField::Quarter(Some(parse_quarter(value)?)))
            }
        }
        "paid" => Ok(TaxField::Paid(parse_bool(value)?)),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown tax field `{}` (name, amount, year, quarter, paid)",
            other
        ))),
    }
}

fn parse_quarter(raw: &str) -> Result<u8, CommandError> {
    let trimmed = raw.trim().trim_start_matches(['q', 'Q']);
    let quarter = trimmed.parse::<u8>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid quarter `{}` (use 1-4)", raw))
    })?;
    if !(1..=4).contains(&quarter) {
        return Err(CommandError::InvalidArguments(format!(
            "invalid quarter `{}` (use 1-4)",
            raw
        )));
    }
    Ok(quarter)
}
