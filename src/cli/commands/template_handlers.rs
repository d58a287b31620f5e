use uuid::Uuid;

use crate::cli::core::{
    parse_amount, parse_bool, resolve_index, take_flag, CommandError, CommandResult, ShellContext,
};
use crate::cli::io;
use crate::cli::output;
use crate::cli::ui::Alignment;
use crate::core::services::{TemplateField, TemplateService};

const ADD_USAGE: &str = "usage: template add <name> <amount> <day>";

pub(super) fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, amount, day) = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        let theme = &context.theme;
        let name = io::prompt_text(theme, "Name")?;
        let amount = io::prompt_amount(theme, "Amount")?;
        let day = io::prompt_text(theme, "Payment day (1-31)")?;
        (name, amount, day)
    } else {
        if args.len() != 3 {
            return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
        }
        (
            args[0].to_string(),
            parse_amount(args[1])?,
            args[2].to_string(),
        )
    };

    TemplateService::add(context.manager.storage(), &name, amount, &day)?;
    io::print_success(format!("Added template `{}`.", name));
    Ok(())
}

pub(super) fn handle_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: template edit <index> <field> <value>".into(),
        ));
    }
    let id = template_id_at(context, args[0])?;
    let field = parse_template_field(args[1], &args[2..].join(" "))?;
    TemplateService::update(context.manager.storage(), id, field)?;
    io::print_success("Template updated.");
    Ok(())
}

pub(super) fn handle_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (rest, force) = take_flag(args, "--force");
    if rest.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: template remove <index> [--force]".into(),
        ));
    }
    let templates = TemplateService::load(context.manager.storage())?;
    let index = resolve_index(rest[0], templates.len(), "template")?;
    let template = &templates[index];

    let prompt = format!("Remove template `{}`?", template.name);
    if !context.confirm_destructive(&prompt, force)? {
        io::print_info("Remove cancelled.");
        return Ok(());
    }

    TemplateService::remove(context.manager.storage(), template.id)?;
    io::print_success("Removed template.");
    Ok(())
}

pub(super) fn handle_list(context: &mut ShellContext) -> CommandResult {
    let templates = TemplateService::load(context.manager.storage())?;
    if templates.is_empty() {
        io::print_info("No templates yet. Use `template add` to create one.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            vec![
                (index + 1).to_string(),
                template.name.clone(),
                context.format_amount(template.amount),
                template.payment_date.clone(),
                if template.active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();

    output::section("Fixed-expense templates");
    output::render_table_aligned(
        &["#", "Name", "Amount", "Day", "Active"],
        &[
            Alignment::Right,
            Alignment::Left,
            Alignment::Right,
            Alignment::Right,
            Alignment::Left,
        ],
        &rows,
    );
    io::print_hint("`template apply` copies every active template into the open month.");
    context.await_menu_escape()
}

pub(super) fn handle_apply(context: &mut ShellContext) -> CommandResult {
    let templates = TemplateService::load(context.manager.storage())?;
    if !templates.iter().any(|template| template.active) {
        io::print_info("No active templates to apply.");
        return Ok(());
    }

    let applied = context
        .manager
        .with_record_mut(|record| TemplateService::apply_to_month(record, &templates));
    io::print_success(format!(
        "Applied {} template{} to {}.",
        applied,
        if applied == 1 { "" } else { "s" },
        context.manager.selected_key().label()
    ));
    Ok(())
}

fn template_id_at(context: &ShellContext, raw: &str) -> Result<Uuid, CommandError> {
    let templates = TemplateService::load(context.manager.storage())?;
    let index = resolve_index(raw, templates.len(), "template")?;
    Ok(templates[index].id)
}

fn parse_template_field(field: &str, value: &str) -> Result<TemplateField, CommandError> {
    match field.to_ascii_lowercase().as_str() {
        "name" => Ok(TemplateField::Name(value.to_string())),
        "amount" => Ok(TemplateField::Amount(parse_amount(value)?)),
        "day" | "date" => Ok(TemplateField::PaymentDate(value.to_string())),
        "active" => Ok(TemplateField::Active(parse_bool(value)?)),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown template field `{}` (name, amount, day, active)",
            other
        ))),
    }
}
