use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output::info as output_info;
use crate::config::Config;
use crate::domain::{Bucket, Frequency};

const SCRIPT_ENV: &str = "BUCKET_BUDGET_CLI_SCRIPT";
const SCRIPT_COMMENT: char = '#';

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "starting shell");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context, io::stdin().lock()),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<BudgetHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(BudgetHelper::from_context(context)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output_info("Bucket Budget shell. Type `help` for commands, Tab to complete.");

    while context.running {
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Runs one command per input line. Blank lines and `#` comments are
/// skipped; a failing command is reported with its line number and the
/// script carries on.
fn run_script(context: &mut ShellContext, input: impl BufRead) -> Result<(), CliError> {
    for (index, line) in input.lines().enumerate() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(SCRIPT_COMMENT) {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => {
                let number = index + 1;
                tracing::warn!(line = number, command = trimmed, "script command failed");
                context.report_error(err)?;
                cli_io::print_hint(format!("(script line {})", number));
            }
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            cli_io::print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.to_string());

    let outcome = context.dispatch(&command, raw, &args);
    if matches!(outcome, Ok(LoopControl::Exit)) {
        context.running = false;
    }
    outcome
}

/// Tab completion and usage hints for the budget commands.
///
/// Commands complete at the start of the line. After that, each argument
/// completes from the values the command accepts: bucket names and aliases
/// and frequencies for `add`, config keys for `config set`, formats for
/// `export --format` and command names for `help`.
struct BudgetHelper {
    commands: Vec<(String, String)>,
}

impl BudgetHelper {
    fn from_context(context: &ShellContext) -> Self {
        let entries = context
            .command_names()
            .into_iter()
            .filter_map(|name| context.command(name))
            .map(|entry| (entry.name, entry.usage));
        Self::new(entries)
    }

    fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut commands: Vec<(String, String)> = entries
            .into_iter()
            .map(|(name, usage)| (name.to_ascii_lowercase(), usage.to_string()))
            .collect();
        commands.sort();
        commands.dedup_by(|a, b| a.0 == b.0);
        Self { commands }
    }

    fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|(name, _)| name.as_str())
    }

    fn usage(&self, command: &str) -> Option<&str> {
        self.commands
            .iter()
            .find(|(name, _)| name == command)
            .map(|(_, usage)| usage.as_str())
    }

    /// Values accepted for the next argument of `command`, given the
    /// arguments already typed before it.
    fn argument_values(&self, command: &str, typed: &[&str]) -> Vec<String> {
        match (command, typed.last().copied()) {
            (_, Some("--format")) => vec!["text".into(), "json".into()],
            (_, Some("--date")) => Vec::new(),
            ("add", _) => match typed.len() {
                0 => bucket_words(),
                2 => Frequency::ALL
                    .iter()
                    .map(|frequency| frequency.label().to_ascii_lowercase())
                    .collect(),
                len if len >= 3 => vec!["--date".into()],
                _ => Vec::new(),
            },
            ("config", None) => vec!["show".into(), "set".into()],
            ("config", Some("set")) if typed.len() == 1 => {
                Config::KEYS.iter().map(|key| key.to_string()).collect()
            }
            ("export", Some(_)) if typed.len() == 1 => vec!["--format".into()],
            ("help", None) => self.command_names().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

/// Lower-case bucket labels and their aliases, in reporting order.
fn bucket_words() -> Vec<String> {
    Bucket::ALL
        .iter()
        .flat_map(|bucket| [bucket.label(), bucket.alias()])
        .map(str::to_ascii_lowercase)
        .collect()
}

impl Helper for BudgetHelper {}

impl Completer for BudgetHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let mut before = prefix[..start].split_whitespace();

        let values = match before.next() {
            None => self.command_names().map(str::to_string).collect(),
            Some(command) => {
                let typed: Vec<&str> = before.collect();
                self.argument_values(&command.to_ascii_lowercase(), &typed)
            }
        };
        let candidates = values
            .into_iter()
            .filter(|value| value.starts_with(&needle))
            .map(|value| Pair {
                display: value.clone(),
                replacement: value,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for BudgetHelper {
    type Hint = String;

    /// After `<command> ` shows the remaining usage, e.g. `add ` hints
    /// `<bucket> <amount> <frequency> <description...>`.
    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos != line.len() || !line.ends_with(' ') {
            return None;
        }
        let mut words = line.split_whitespace();
        let command = words.next()?.to_ascii_lowercase();
        if words.next().is_some() {
            return None;
        }
        let usage = self.usage(&command)?;
        let rest = usage.strip_prefix(command.as_str())?.trim_start();
        (!rest.is_empty()).then(|| rest.to_string())
    }
}

impl Highlighter for BudgetHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for BudgetHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn helper() -> BudgetHelper {
        BudgetHelper::new([
            ("summary", "summary"),
            ("saved", "saved <amount>"),
            ("add", "add <bucket> <amount> <frequency> <description...> [--date YYYY-MM-DD]"),
            ("config", "config [show|set <key> <value>]"),
            ("export", "export <path> [--format text|json]"),
            ("help", "help [command]"),
        ])
    }

    fn complete(line: &str) -> Vec<String> {
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let (_, pairs) = helper().complete(line, line.len(), &ctx).unwrap();
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line("add needs 5 weekly \"Bus").is_err());
    }

    #[test]
    fn completes_command_names_at_line_start() {
        assert_eq!(complete("s"), vec!["saved", "summary"]);
        assert_eq!(complete("help su"), vec!["summary"]);
    }

    #[test]
    fn add_completes_buckets_then_frequencies() {
        assert_eq!(complete("add e"), vec!["essential"]);
        assert_eq!(complete("add s"), vec!["savings"]);
        assert_eq!(complete("add wants 12.50 "), vec!["weekly", "fortnightly", "monthly"]);
        assert_eq!(complete("add wants 12.50 m"), vec!["monthly"]);
        assert!(complete("add wants 1").is_empty());
        assert_eq!(complete("add wants 12.50 weekly Lunch --d"), vec!["--date"]);
    }

    #[test]
    fn config_and_export_complete_their_options() {
        assert_eq!(complete("config s"), vec!["show", "set"]);
        assert_eq!(complete("config set back"), vec!["backup_retention"]);
        assert_eq!(complete("export out.txt --"), vec!["--format"]);
        assert_eq!(complete("export out.txt --format j"), vec!["json"]);
    }

    #[test]
    fn hints_show_remaining_usage() {
        let history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&history);
        let helper = helper();
        assert_eq!(helper.hint("saved ", 6, &ctx), Some("<amount>".to_string()));
        assert_eq!(helper.hint("summary ", 8, &ctx), None);
        assert_eq!(helper.hint("saved 5", 7, &ctx), None);
    }

    #[test]
    fn scripts_skip_comments_and_continue_past_errors() {
        let temp = tempdir().unwrap();
        let mut context =
            ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf()).unwrap();
        let script = "# fortnight of 1 July\n\
                      income 2000\n\
                      \n\
                      add needs -5 weekly Rent\n\
                      add needs 1200 fortnightly Rent\n\
                      exit\n\
                      add wants 40 weekly Cinema\n";
        run_script(&mut context, script.as_bytes()).unwrap();

        assert!(!context.running);
        assert_eq!(context.session.ledger().len(), 1);
        assert_eq!(context.session.summary().leftover, dec!(800));
    }
}
