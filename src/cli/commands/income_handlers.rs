use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_bool, resolve_index, take_flag, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::ui::Alignment;
use crate::core::services::{CommissionField, IncomeService};
use crate::domain::{commission_fee, CommissionIncome, TransactionSide};

const ADD_USAGE: &str = "usage: income add <name> [deposit] [rent] [fees] [--double]";

pub(super) fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let income = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        prompt_income(context)?
    } else {
        income_from_args(args)?
    };

    let name = income.name.clone();
    context
        .manager
        .try_with_record_mut(|record| IncomeService::add(record, income))?;
    io::print_success(format!("Added commission income `{}`.", name));
    Ok(())
}

pub(super) fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: income edit <index> <field> <value>".into(),
        ));
    }
    let id = income_id_at(context, args[0])?;
    let field = parse_income_field(args[1], &args[2..].join(" "))?;
    context
        .manager
        .try_with_record_mut(|record| IncomeService::update(record, id, field))?;
    io::print_success("Income updated.");
    Ok(())
}

pub(super) fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: income remove <index>".into(),
        ));
    }
    let id = income_id_at(context, args[0])?;
    context
        .manager
        .try_with_record_mut(|record| IncomeService::remove(record, id))?;
    io::print_success("Removed commission income.");
    Ok(())
}

pub(super) fn handle_list(context: &mut ShellContext) -> CommandResult {
    let record = context.manager.current();
    if record.commission_incomes.is_empty() {
        io::print_info("No commission incomes this month.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = record
        .commission_incomes
        .iter()
        .enumerate()
        .map(|(index, income)| {
            vec![
                (index + 1).to_string(),
                income.name.clone(),
                income.property.clone(),
                context.format_amount(income.deposit),
                context.format_amount(income.monthly_rent),
                income.side.label().to_string(),
                context.format_amount(income.display_total()),
                if income.received { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    output::section(format!("Commission incomes for {}", record.key().label()));
    output::render_table_aligned(
        &["#", "Client", "Property", "Deposit", "Rent", "Side", "Fee", "Received"],
        &[
            Alignment::Right,
            Alignment::Left,
            Alignment::Left,
            Alignment::Right,
            Alignment::Right,
            Alignment::Left,
            Alignment::Right,
            Alignment::Left,
        ],
        &rows,
    );

    let total: f64 = record
        .commission_incomes
        .iter()
        .map(CommissionIncome::display_total)
        .sum();
    io::print_info(format!("Commission total: {}", context.format_amount(total)));
    io::print_info(format!("Base income: {}", context.format_amount(record.income)));
    context.await_menu_escape()
}

pub(super) fn handle_received(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: income received <index>".into(),
        ));
    }
    let id = income_id_at(context, args[0])?;
    let currently = context
        .manager
        .current()
        .commission_incomes
        .iter()
        .find(|income| income.id == id)
        .map(|income| income.received)
        .unwrap_or(false);
    context.manager.try_with_record_mut(|record| {
        IncomeService::update(record, id, CommissionField::Received(!currently))
    })?;
    io::print_success(if currently {
        "Marked as not received."
    } else {
        "Marked as received."
    });
    Ok(())
}

pub(super) fn handle_base(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = if args.len() == 1 {
        parse_amount(args[0])?
    } else if args.is_empty() && context.is_interactive() {
        io::prompt_amount(&context.theme, "Base income")?
    } else {
        return Err(CommandError::InvalidArguments(
            "usage: income base <amount>".into(),
        ));
    };

    context
        .manager
        .try_with_record_mut(|record| IncomeService::set_base_income(record, amount))?;
    io::print_success(format!(
        "Base income set to {}.",
        context.format_amount(amount)
    ));
    Ok(())
}

pub(super) fn handle_calc(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, double) = take_flag(args, "--double");
    if rest.len() < 2 || rest.len() > 3 {
        return Err(CommandError::InvalidArguments(
            "usage: calc <deposit> <monthly-rent> [other-fees] [--double]".into(),
        ));
    }
    let deposit = parse_amount(rest[0])?;
    let monthly_rent = parse_amount(rest[1])?;
    let other_fees = rest.get(2).map(|raw| parse_amount(raw)).transpose()?.unwrap_or(0.0);
    let side = if double {
        TransactionSide::Double
    } else {
        TransactionSide::Single
    };

    let fee = commission_fee(deposit, monthly_rent, other_fees, side);
    io::print_info(format!(
        "Commission fee ({}): {}",
        side.label(),
        context.format_amount(fee)
    ));
    Ok(())
}

fn income_from_args(args: &[&str]) -> Result<CommissionIncome, CommandError> {
    let (rest, double) = take_flag(args, "--double");
    if rest.is_empty() || rest.len() > 4 {
        return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
    }

    let mut income = CommissionIncome::new(rest[0]);
    if let Some(raw) = rest.get(1) {
        income.deposit = parse_amount(raw)?;
    }
    if let Some(raw) = rest.get(2) {
        income.monthly_rent = parse_amount(raw)?;
    }
    if let Some(raw) = rest.get(3) {
        income.other_fees = parse_amount(raw)?;
    }
    if double {
        income.side = TransactionSide::Double;
    }
    Ok(income)
}

fn prompt_income(context: &ShellContext) -> Result<CommissionIncome, CommandError> {
    let theme = &context.theme;
    let mut income = CommissionIncome::new(io::prompt_text(theme, "Client or deal name")?);
    income.property = io::prompt_optional(theme, "Property (optional)")?;
    income.room = io::prompt_optional(theme, "Unit (optional)")?;
    income.deposit = io::prompt_amount_or(theme, "Deposit", 0.0)?;
    income.monthly_rent = io::prompt_amount_or(theme, "Monthly rent", 0.0)?;
    income.other_fees = io::prompt_amount_or(theme, "Other fees", 0.0)?;
    if io::confirm_action(theme, "Double-sided deal?", false)? {
        income.side = TransactionSide::Double;
    }
    income.memo = io::prompt_optional(theme, "Memo (optional)")?;
    Ok(income)
}

fn income_id_at(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let incomes = &context.manager.current().commission_incomes;
    let index = resolve_index(raw, incomes.len(), "income")?;
    Ok(incomes[index].id)
}

fn parse_income_field(field: &str, value: &str) -> Result<CommissionField, CommandError> {
    match field.to_ascii_lowercase().as_str() {
        "name" => Ok(CommissionField::Name(value.to_string())),
        "property" => Ok(CommissionField::Property(value.to_string())),
        "room" | "unit" => Ok(CommissionField::Room(value.to_string())),
        "deposit" => Ok(CommissionField::Deposit(parse_amount(value)?)),
        "rent" => Ok(CommissionField::MonthlyRent(parse_amount(value)?)),
        "fees" => Ok(CommissionField::OtherFees(parse_amount(value)?)),
        "actual" => {
            if value.eq_ignore_ascii_case("none") {
                Ok(CommissionField::ActualAmount(None))
            } else {
                Ok(CommissionField::ActualAmount(Some(parse_amount(value)?)))
            }
        }
        "side" => TransactionSide::parse(value)
            .map(CommissionField::Side)
            .ok_or_else(|| {
                CommandError::InvalidArguments("side must be `single` or `double`".into())
            }),
        "received" => Ok(CommissionField::Received(parse_bool(value)?)),
        "memo" => Ok(CommissionField::Memo(value.to_string())),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown income field `{}` (name, property, unit, deposit, rent, fees, actual, side, received, memo)",
            other
        ))),
    }
}
