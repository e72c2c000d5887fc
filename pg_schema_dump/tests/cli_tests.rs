//! Command line parsing and exit codes; none of these reach a database

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
	let mut cmd = Command::cargo_bin("pg_schema_dump").unwrap();
	for var in ["PGDATABASE", "PGUSER", "PGHOST", "PGPORT", "PGPASSWORD", "RUST_LOG"].iter() {
		cmd.env_remove(var);
	}
	cmd
}

#[test]
fn help_lists_both_passes() {
	cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("functions"))
		.stdout(predicate::str::contains("tables"))
		.stdout(predicate::str::contains("--schema"));
}

#[test]
fn missing_connection_settings_exit_with_config_code() {
	cmd()
		.arg("functions")
		.assert()
		.code(5)
		.stderr(predicate::str::contains("Configuration error: missing database name, user, host"));
}

#[test]
fn unreadable_config_file_exits_with_config_code() {
	cmd()
		.args(&["--config", "/definitely/not/here.yaml", "tables"])
		.assert()
		.code(5)
		.stderr(predicate::str::contains("cannot read /definitely/not/here.yaml"));
}

#[test]
fn invalid_date_is_rejected_by_the_parser() {
	cmd()
		.args(&["--date", "07/03/2024", "tables"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("--date"));
}
