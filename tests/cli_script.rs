mod common;

use assert_cmd::Command;
use common::temp_data_dir;
use predicates::prelude::*;

fn cli(base: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("bucket_budget_cli").unwrap();
    cmd.env("BUCKET_BUDGET_CLI_SCRIPT", "1")
        .env("BUCKET_BUDGET_HOME", base)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn script_mode_records_and_summarizes() {
    let base = temp_data_dir();
    let input = "income 2000\n\
                 add essential 1200 fortnightly Rent\n\
                 add wants 100 weekly \"Dining out\"\n\
                 summary\n\
                 exit\n";

    cli(&base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded Rent"))
        .stdout(predicate::str::contains("Total spent  : $1,400.00"))
        .stdout(predicate::str::contains("Leftover     : $600.00"))
        .stdout(predicate::str::contains("Primary Savings: $600.00 of $1,000.00 (60.0%)"));

    let json = std::fs::read_to_string(base.join("transactions.json")).unwrap();
    assert!(json.contains("\"Dining out\""));
    assert!(json.contains("\"category\": \"Discretionary\""));
}

#[test]
fn validation_errors_do_not_abort_the_script() {
    let base = temp_data_dir();
    cli(&base)
        .write_stdin("add needs 0 weekly Bus\nlist\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input"))
        .stdout(predicate::str::contains("No transactions recorded"));
}

#[test]
fn export_writes_statement() {
    let base = temp_data_dir();
    let target = base.join("statement.txt");
    let input = format!("income 500\nexport \"{}\"\nexit\n", target.display());

    cli(&base)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Statement written"));

    let text = std::fs::read_to_string(target).unwrap();
    assert!(text.starts_with("FINANCIAL AUDIT STATEMENT"));
    assert!(text.contains("Net Balance: $500.00"));
}

#[test]
fn typos_get_suggestions() {
    let base = temp_data_dir();
    cli(&base)
        .write_stdin("sumary\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggestion: `summary`?"));
}

#[test]
fn script_comments_are_skipped_and_failures_name_their_line() {
    let base = temp_data_dir();
    cli(&base)
        .write_stdin("# weekly shop\nadd needs 0 weekly Groceries\nincome 900\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(script line 2)"))
        .stdout(predicate::str::contains("Unknown command").not())
        .stdout(predicate::str::contains("Income set to $900.00."));
}

#[test]
fn blocked_period_file_keeps_the_ledger_on_rollover() {
    let base = temp_data_dir();
    cli(&base)
        .write_stdin("income 2000\nadd needs 1800 fortnightly Rent\nexit\n")
        .assert()
        .success();
    std::fs::create_dir_all(base.join("period.json.tmp")).unwrap();

    cli(&base)
        .write_stdin("rollover\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Persistence error"))
        .stdout(predicate::str::contains("Period closed").not());

    std::fs::remove_dir(base.join("period.json.tmp")).unwrap();
    cli(&base)
        .write_stdin("summary\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total spent  : $1,800.00"))
        .stdout(predicate::str::contains("Leftover     : $200.00"));
}
