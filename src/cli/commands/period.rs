use crate::cli::core::{parse_amount, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::currency::format_currency;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "income",
            "Set this period's fortnightly income",
            "income <amount>",
            cmd_income,
        ),
        CommandEntry::new(
            "carryover",
            "Set the amount carried in from the prior period",
            "carryover <amount>",
            cmd_carryover,
        ),
        CommandEntry::new(
            "goal",
            "Name the savings goal and set its target",
            "goal <target> <name...>",
            cmd_goal,
        ),
        CommandEntry::new(
            "saved",
            "Set how much is already saved toward the goal",
            "saved <amount>",
            cmd_saved,
        ),
        CommandEntry::new(
            "rollover",
            "Close the period and carry any leftover forward",
            "rollover",
            cmd_rollover,
        ),
        CommandEntry::new(
            "reset",
            "Clear transactions and restore default inputs and goal",
            "reset",
            cmd_reset,
        ),
    ]
}

fn single_amount(args: &[&str], usage: &str) -> Result<rust_decimal::Decimal, CommandError> {
    match args {
        [value] => parse_amount(value),
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", usage))),
    }
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = single_amount(args, "income <amount>")?;
    context.session.set_income(amount)?;
    io::print_success(format!(
        "Income set to {}.",
        format_currency(amount, context.currency_symbol())
    ));
    Ok(())
}

fn cmd_carryover(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = single_amount(args, "carryover <amount>")?;
    context.session.set_carryover(amount)?;
    io::print_success(format!(
        "Carryover set to {}.",
        format_currency(amount, context.currency_symbol())
    ));
    Ok(())
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((target, name)) = args.split_first().filter(|(_, name)| !name.is_empty()) else {
        return Err(CommandError::InvalidArguments(
            "usage: goal <target> <name...>".into(),
        ));
    };
    let target = parse_amount(target)?;
    let name = name.join(" ");
    context.session.set_goal(&name, target)?;
    io::print_success(format!(
        "Saving toward {} with a target of {}.",
        context.session.goal().name,
        format_currency(target, context.currency_symbol())
    ));
    Ok(())
}

fn cmd_saved(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let amount = single_amount(args, "saved <amount>")?;
    context.session.set_saved(amount)?;
    io::print_success(format!(
        "Saved balance set to {}.",
        format_currency(amount, context.currency_symbol())
    ));
    Ok(())
}

fn cmd_rollover(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Close this period and start the next one?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let closing = context.session.rollover()?;
    let symbol = context.currency_symbol();
    if closing.is_overspent() {
        io::print_warning(format!(
            "Period closed {} over budget; nothing carried forward.",
            format_currency(closing.leftover.abs(), symbol)
        ));
    } else {
        io::print_success(format!(
            "Period closed. Carried {} into the next period.",
            format_currency(closing.leftover, symbol)
        ));
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Reset everything for this period?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    context.session.reset()?;
    io::print_success("Session reset to defaults.");
    Ok(())
}
