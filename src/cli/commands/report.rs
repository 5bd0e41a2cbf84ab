use std::{fs, path::PathBuf};

use rust_decimal::Decimal;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{section as output_section, separator};
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::currency::{format_currency, format_percent};
use crate::domain::Displayable;
use crate::export::ExportFormat;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show the allocation dashboard for this period",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "export",
            "Write an audit statement to a file",
            "export <path> [--format text|json]",
            cmd_export,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.session.summary();
    let inputs = context.session.inputs();
    let symbol = context.currency_symbol();

    output_section("Period summary");
    io::print_info(format!(
        "Total pool   : {} (income {} + carryover {})",
        format_currency(report.total_pool, symbol),
        format_currency(inputs.income_amount, symbol),
        format_currency(inputs.carryover_from_prior, symbol)
    ));
    io::print_info(format!(
        "Total spent  : {}",
        format_currency(report.total_spent, symbol)
    ));
    io::print_info(format!(
        "Leftover     : {}",
        format_currency(report.leftover, symbol)
    ));

    let mut table = Table::for_terminal(vec![
        TableColumn::fixed("Bucket", 13, Alignment::Left),
        TableColumn::fixed("Target", 12, Alignment::Right),
        TableColumn::fixed("Spent", 12, Alignment::Right),
        TableColumn::fixed("Remaining", 12, Alignment::Right),
    ]);
    for line in &report.per_bucket {
        table.push_row(vec![
            line.bucket.display_label(),
            format_currency(line.target_amount, symbol),
            format_currency(line.spent_amount, symbol),
            format_currency(line.remaining_amount, symbol),
        ]);
    }
    separator();
    io::print_info(table.render());

    let over_target = report
        .per_bucket
        .iter()
        .filter(|line| line.remaining_amount < Decimal::ZERO);
    for line in over_target {
        io::print_warning(format!(
            "{} is over its target by {}.",
            line.bucket,
            format_currency(line.remaining_amount.abs(), symbol)
        ));
    }
    if report.is_overspent() {
        io::print_warning("Spending exceeds the available pool.");
    }

    let progress = &report.goal_progress;
    separator();
    io::print_info(format!(
        "Goal {}: {} of {} ({})",
        report.goal_name,
        format_currency(progress.new_saved, symbol),
        format_currency(report.goal_target, symbol),
        format_percent(progress.ratio)
    ));
    if progress.is_complete() {
        io::print_success("Goal reached.");
    } else {
        io::print_info(format!(
            "Still to save: {}",
            format_currency(progress.remaining_to_target(report.goal_target), symbol)
        ));
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (path, format) = match args {
        [path] => (*path, ExportFormat::default()),
        [path, "--format", format] => (*path, format.parse::<ExportFormat>()?),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: export <path> [--format text|json]".into(),
            ))
        }
    };

    let fields = context.session.summary().statement_fields(context.clock.now());
    let exporter = format.exporter(context.currency_symbol());
    let bytes = exporter.export(&fields)?;

    let mut path = PathBuf::from(path);
    if path.extension().is_none() {
        path.set_extension(exporter.extension());
    }
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "statement exported");
    io::print_success(format!("Statement written to {}.", path.display()));
    Ok(())
}
