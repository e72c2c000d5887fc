//! Connects to a PostgreSQL database and writes every function definition and table's CREATE statement into its own file
//!
//! ```text
//! <output>/
//! 	<schema>/
//! 		functions/<name>_<arity>.sql
//! 		tables/<name>.sql
//! ```

pub mod config;

pub mod connection;

pub mod db_model;

pub mod error;

pub mod functions;

pub mod materialize;

pub mod orchestrator;

pub mod output;

pub mod schemas;

pub mod tables;

mod pg_select_types;
pub use pg_select_types::{GetFunctions, GetTables};

pub use config::ConnectionParameters;
pub use error::{ExtractError, Result};
pub use orchestrator::{ExtractionOrchestrator, PassSummary};

use chrono::NaiveDate;
use std::{fmt, path::PathBuf};
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(name = "pg_schema_dump", about = "Dumps PostgreSQL function definitions and table DDL into one file per object")]
pub struct Opt {
	/// YAML file with connection parameters, overridden by any flag below
	#[structopt(short = "c", long = "config", parse(from_os_str))]
	pub config: Option<PathBuf>,

	/// Database to connect to
	#[structopt(short = "d", long = "dbname", env = "PGDATABASE")]
	pub database_name: Option<String>,

	#[structopt(short = "U", long = "user", env = "PGUSER")]
	pub user: Option<String>,

	#[structopt(long = "host", env = "PGHOST")]
	pub host: Option<String>,

	#[structopt(short = "p", long = "port", env = "PGPORT")]
	pub port: Option<u16>,

	#[structopt(long = "password", env = "PGPASSWORD", hide_env_values = true)]
	pub password: Option<String>,

	/// Only dump the schema with exactly this name
	#[structopt(short = "s", long = "schema")]
	pub schema: Option<String>,

	/// Directory the dated backup folder is created in
	#[structopt(short = "o", long = "output", default_value = ".", parse(from_os_str))]
	pub output: PathBuf,

	/// Date used in the backup folder name (YYYY-MM-DD), defaults to today
	#[structopt(long = "date")]
	pub date: Option<NaiveDate>,

	/// Log filter used when RUST_LOG is not set
	#[structopt(long = "log-level", default_value = "info")]
	pub log_level: String,

	#[structopt(subcommand)]
	pub mode: Mode,
}

// the password never shows up in logs
impl fmt::Debug for Opt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Opt")
			.field("config", &self.config)
			.field("database_name", &self.database_name)
			.field("user", &self.user)
			.field("host", &self.host)
			.field("port", &self.port)
			.field("password", &self.password.as_ref().map(|_| "********"))
			.field("schema", &self.schema)
			.field("output", &self.output)
			.field("date", &self.date)
			.field("log_level", &self.log_level)
			.field("mode", &self.mode)
			.finish()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StructOpt)]
pub enum Mode {
	/// Dump function and procedure definitions
	Functions,
	/// Dump CREATE TABLE statements
	Tables,
	/// Dump functions, then tables
	All,
}

impl Mode {
	pub fn includes_functions(self) -> bool {
		self != Mode::Tables
	}

	pub fn includes_tables(self) -> bool {
		self != Mode::Functions
	}
}

impl Opt {
	/// Connection file (if any) with command line values laid over it
	pub fn connection_params(&self) -> Result<ConnectionParameters> {
		let mut params = match &self.config {
			Some(path) => ConnectionParameters::from_yaml_file(path)?,
			None => ConnectionParameters::default(),
		};

		if let Some(v) = &self.database_name {
			params.database_name = v.clone();
		}
		if let Some(v) = &self.user {
			params.user = v.clone();
		}
		if let Some(v) = &self.host {
			params.host = v.clone();
		}
		if let Some(v) = self.port {
			params.port = v;
		}
		if let Some(v) = &self.password {
			params.password = v.clone();
		}
		if let Some(v) = &self.schema {
			params.schema_filter = v.clone();
		}

		params.validate()?;
		Ok(params)
	}
}
