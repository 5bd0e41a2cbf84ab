use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::currency::{format_currency, format_date};
use crate::domain::{Bucket, Displayable, Frequency, TransactionDraft};

const ADD_USAGE: &str = "add <bucket> <amount> <frequency> <description...> [--date YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a transaction against a bucket",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new("list", "Show the itemized transaction log", "list", cmd_list),
        CommandEntry::new(
            "clear",
            "Remove every transaction, keeping income and goal",
            "clear",
            cmd_clear,
        ),
    ]
}

/// Splits a trailing `--date <value>` off the argument list.
fn split_date_flag<'a>(
    args: &[&'a str],
) -> Result<(Vec<&'a str>, Option<&'a str>), CommandError> {
    let mut rest = Vec::with_capacity(args.len());
    let mut date = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == "--date" {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments("`--date` needs a value (YYYY-MM-DD)".into())
            })?;
            date = Some(*value);
        } else {
            rest.push(*arg);
        }
    }
    Ok((rest, date))
}

fn parse_draft(context: &ShellContext, args: &[&str]) -> Result<TransactionDraft, CommandError> {
    let (rest, date) = split_date_flag(args)?;
    if rest.len() < 4 {
        return Err(CommandError::InvalidArguments(format!("usage: {}", ADD_USAGE)));
    }
    let bucket: Bucket = rest[0].parse()?;
    let amount = parse_amount(rest[1])?;
    let frequency: Frequency = rest[2].parse()?;
    let description = rest[3..].join(" ");
    let date = match date {
        Some(value) => parse_date(value)?,
        None => context.clock.today(),
    };

    let draft = TransactionDraft::new(description, bucket, amount, frequency, date);
    draft.validate()?;
    Ok(draft)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = parse_draft(context, args)?;
    let id = context.session.record(draft)?;
    if let Some(txn) = context.session.ledger().transaction(id) {
        let symbol = context.currency_symbol();
        io::print_success(format!(
            "Recorded {}: {} {}, {} per fortnight.",
            txn.display_label(),
            format_currency(txn.amount(), symbol),
            txn.frequency().label().to_lowercase(),
            format_currency(txn.normalized_amount(), symbol)
        ));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.session.ledger().all_transactions();
    output_section("Itemized log");
    if transactions.is_empty() {
        io::print_info("No transactions recorded this period.");
        return Ok(());
    }

    let symbol = context.currency_symbol();
    let mut table = Table::for_terminal(vec![
        TableColumn::fixed("Date", 10, Alignment::Left),
        TableColumn::fixed("Bucket", 13, Alignment::Left),
        TableColumn::flexible("Description", 12),
        TableColumn::fixed("Entered", 10, Alignment::Right),
        TableColumn::fixed("Freq", 11, Alignment::Left),
        TableColumn::fixed("Fortnightly", 11, Alignment::Right),
    ]);
    for txn in transactions {
        table.push_row(vec![
            format_date(txn.date()),
            txn.bucket().to_string(),
            txn.description().to_string(),
            format_currency(txn.amount(), symbol),
            txn.frequency().label().to_string(),
            format_currency(txn.normalized_amount(), symbol),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!(
        "{} transaction(s), {} spent per fortnight.",
        transactions.len(),
        format_currency(context.session.ledger().total_spent(), symbol)
    ));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Remove every transaction from this period?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    context.session.clear_transactions()?;
    io::print_success("Ledger cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_flag_can_appear_anywhere() {
        let args = ["needs", "--date", "2024-02-01", "50", "weekly", "Bus", "pass"];
        let (rest, date) = split_date_flag(&args).unwrap();
        assert_eq!(rest, vec!["needs", "50", "weekly", "Bus", "pass"]);
        assert_eq!(date, Some("2024-02-01"));
        assert!(split_date_flag(&["needs", "--date"]).is_err());
    }
}
