//! Tests for CLI command dispatch and exit codes

use std::fs;

use clap::Parser;
use tempfile::TempDir;

use menutree::cli::commands::execute_command;
use menutree::cli::{Cli, CliError};
use menutree::exitcode;
use menutree::util::testing::init_test_setup;

/// Parse arguments with an explicit, empty config file so a developer's
/// global config cannot influence the result.
fn cli(temp: &TempDir, args: &[&str]) -> Cli {
    let config = temp.path().join("menutree.toml");
    fs::write(&config, "").unwrap();
    let config = config.to_string_lossy().to_string();

    let mut argv = vec!["menutree", "-c", config.as_str()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn given_no_subcommand_when_executing_then_usage_error() {
    let cli = Cli::try_parse_from(["menutree"]).unwrap();
    let err = execute_command(&cli).unwrap_err();
    assert!(matches!(err, CliError::Usage(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_valid_script_when_running_then_succeeds() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("edits.txt");
    fs::write(&script, "root Inbox as inbox\nmove item-2 inbox\ndelete ghost\n").unwrap();

    let cli = cli(&temp, &["run", script.to_str().unwrap(), "--check", "--ids"]);

    assert!(execute_command(&cli).is_ok());
}

#[test]
fn given_stale_command_when_running_strict_then_data_error() {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("edits.txt");
    fs::write(&script, "delete ghost\n").unwrap();

    let cli = cli(&temp, &["run", script.to_str().unwrap(), "--strict"]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_missing_script_when_checking_then_noinput() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    let cli = cli(&temp, &["check", missing.to_str().unwrap()]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_unparsable_script_when_checking_then_data_error() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.txt");
    fs::write(&script, "shuffle everything\n").unwrap();

    let cli = cli(&temp, &["check", script.to_str().unwrap()]);
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_malformed_config_when_executing_then_config_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    fs::write(&config, "strict = [").unwrap();

    let cli = Cli::try_parse_from(["menutree", "-c", config.to_str().unwrap(), "show"]).unwrap();
    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CONFIG);
}

#[test]
fn given_config_template_when_executing_then_succeeds() {
    let temp = TempDir::new().unwrap();
    let cli = cli(&temp, &["config", "template"]);
    assert!(execute_command(&cli).is_ok());
}
