//! Integration tests for the circdesk binary.
//!
//! These tests drive the desk end to end by piping librarian commands
//! through stdin:
//! - Opening, closing and the day counter
//! - Card issue, search, check-out and check-in
//! - Error reporting for illegal or malformed commands
//! - The catalog and config subcommands

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const COLLECTION: &str = "(\"20,000 Leagues Under the Seas\", \"Jules Verne\")
(\"Contact\", \"Carl Sagan\")
(\"Contact\", \"Carl Sagan\")
(\"Cosmos\", \"Carl Sagan\")
(\"Emma\", \"Jane Austen\")
";

/// Helper to create a data directory with a collection and an empty config
fn setup_test_dir() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let collection = temp_dir.path().join("collection.txt");
    fs::write(&collection, COLLECTION).expect("Failed to write collection");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "").expect("Failed to write config");
    (temp_dir, collection, config)
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::cargo_bin("circdesk").expect("Failed to find circdesk binary")
}

/// Run the desk with `script` on stdin
fn run_script(script: &str) -> assert_cmd::assert::Assert {
    let (_temp_dir, collection, config) = setup_test_dir();
    cli()
        .arg("--collection")
        .arg(&collection)
        .arg("--config")
        .arg(&config)
        .write_stdin(script)
        .assert()
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Library circulation desk"));
}

#[test]
fn test_banner_and_quit() {
    run_script("quit()\n")
        .success()
        .stdout(predicate::str::contains("5 books in collection."))
        .stdout(predicate::str::contains(
            "Type 'help()' for a list of commands.",
        ))
        .stdout(predicate::str::contains(
            "The library is now closed for renovations",
        ));
}

#[test]
fn test_eof_ends_session() {
    run_script("open()\n")
        .success()
        .stdout(predicate::str::contains("Today is day 1"));
}

#[test]
fn test_commands_after_quit_are_ignored() {
    run_script("quit()\nopen()\n")
        .success()
        .stdout(predicate::str::contains("Today is day").not());
}

#[test]
fn test_closed_library_rejects_commands() {
    run_script("issue_card(\"Amy\")\nsearch(\"Contact\")\n")
        .success()
        .stdout(predicate::str::contains("The library is not open."))
        .stdout(predicate::str::contains("Library card issued").not());
}

#[test]
fn test_unknown_and_blank_commands() {
    run_script("dance()\n\n")
        .success()
        .stdout(predicate::str::contains("Sorry, I didn't understand: dance()"))
        .stdout(predicate::str::contains(
            "Type 'help()' for a list of the things I do understand.",
        ))
        .stdout(predicate::str::contains("What? Speak up!"));
}

#[test]
fn test_check_out_without_patron() {
    run_script("open()\nsearch(\"Contact\")\ncheck_out(1)\n")
        .success()
        .stdout(predicate::str::contains("\t1. Contact, by Carl Sagan"))
        .stdout(predicate::str::contains(
            "No patron is currently being served.",
        ));
}

#[test]
fn test_short_search_reported() {
    run_script("open()\nsearch(\"ab\")\n")
        .success()
        .stdout(predicate::str::contains(
            "Search string must contain at least four characters.",
        ));
}

#[test]
fn test_full_circulation_workflow() {
    let script = "open()
issue_card(\"Bob\")
search(\"20,000\")
check_out(1)
serve(\"Bob\")
check_in(1)
close()
";
    run_script(script)
        .success()
        .stdout(predicate::str::contains("Library card issued to Bob."))
        .stdout(predicate::str::contains(
            "\t1. 20,000 Leagues Under the Seas, by Jules Verne",
        ))
        .stdout(predicate::str::contains(
            "1 books have been checked out to Bob.",
        ))
        .stdout(predicate::str::contains("Bob has these books:"))
        .stdout(predicate::str::contains("Bob has returned 1 books."))
        .stdout(predicate::str::contains("Good night"));
}

#[test]
fn test_overdue_report_after_days_pass() {
    let mut script =
        String::from("open()\nissue_card(\"Bob\")\nsearch(\"20,000\")\ncheck_out(1)\n");
    for _ in 0..9 {
        script.push_str("close()\nopen()\n");
    }
    script.push_str("list_overdue_books()\n");

    run_script(&script)
        .success()
        .stdout(predicate::str::contains("Today is day 10"))
        .stdout(predicate::str::contains(
            "Bob:\n\t1. 20,000 Leagues Under the Seas\n",
        ));
}

#[test]
fn test_bad_check_in_number_is_reported() {
    let script = "open()
issue_card(\"Amy\")
search(\"Sagan\")
check_out(1)
serve(\"Amy\")
check_in(4)
";
    run_script(script)
        .success()
        .stdout(predicate::str::contains("The patron does not have book 4."))
        .stdout(predicate::str::contains("has returned").not());
}

#[test]
fn test_policy_from_config() {
    let (_temp_dir, collection, config) = setup_test_dir();
    fs::write(&config, "[policy]\nmax_books_per_member = 1\n").unwrap();

    cli()
        .arg("--collection")
        .arg(&collection)
        .arg("--config")
        .arg(&config)
        .write_stdin("open()\nissue_card(\"Amy\")\nsearch(\"Sagan\")\ncheck_out(1, 2)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Sorry, Amy already has 1 books checked out.",
        ));
}

#[test]
fn test_malformed_collection_fails() {
    let (_temp_dir, collection, config) = setup_test_dir();
    fs::write(&collection, "Contact by Carl Sagan\n").unwrap();

    cli()
        .arg("--collection")
        .arg(&collection)
        .arg("--config")
        .arg(&config)
        .write_stdin("quit()\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line: 1"));
}

#[test]
fn test_missing_collection_uses_sample() {
    let (temp_dir, _collection, config) = setup_test_dir();

    cli()
        .arg("--collection")
        .arg(temp_dir.path().join("missing.txt"))
        .arg("--config")
        .arg(&config)
        .write_stdin("open()\nsearch(\"Verne\")\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Around the World in Eighty Days"));
}

#[test]
fn test_catalog_groups_copies() {
    let (_temp_dir, collection, config) = setup_test_dir();

    cli()
        .arg("catalog")
        .arg("--collection")
        .arg(&collection)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 books in collection."))
        .stdout(predicate::str::contains(
            "Contact, by Carl Sagan (2 copies)",
        ));
}

#[test]
fn test_catalog_json() {
    let (_temp_dir, collection, config) = setup_test_dir();

    let output = cli()
        .arg("catalog")
        .arg("--json")
        .arg("--collection")
        .arg(&collection)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run circdesk");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"title\": \"Cosmos\""));
    assert!(stdout.contains("\"due_date\": null"));
}

#[test]
fn test_config_prints_effective_policy() {
    let (_temp_dir, _collection, config) = setup_test_dir();
    fs::write(&config, "[policy]\nloan_period_days = 21\n").unwrap();

    cli()
        .arg("config")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("loan_period_days = 21"))
        .stdout(predicate::str::contains("max_books_per_member = 3"));
}

#[test]
fn test_config_init_writes_explicit_path() {
    let temp_dir = setup_test_dir().0;
    let target = temp_dir.path().join("fresh").join("config.toml");

    cli()
        .arg("config")
        .arg("--init")
        .arg("--config")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote config to"));

    let written = fs::read_to_string(&target).expect("config not written");
    assert!(written.contains("max_books_per_member = 3"));
}

#[test]
fn test_config_init_keeps_existing_file() {
    let (_temp_dir, _collection, config) = setup_test_dir();
    fs::write(&config, "[policy]\nloan_period_days = 21\n").unwrap();

    cli()
        .arg("config")
        .arg("--init")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config already exists at"));

    assert_eq!(
        fs::read_to_string(&config).unwrap(),
        "[policy]\nloan_period_days = 21\n"
    );
}
