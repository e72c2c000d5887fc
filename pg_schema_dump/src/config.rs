//! Connection settings for one extraction run

use std::{
	fmt,
	path::Path,
	time::Duration,
};

use serde::Deserialize;

use crate::error::{ExtractError, Result};

pub const DEFAULT_PORT: u16 = 5432;

/// Everything needed to reach the catalog, plus the schema filter
///
/// Built once per run and only ever borrowed afterwards. An empty `schema_filter` selects every schema
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionParameters {
	#[serde(default)]
	pub database_name: String,
	#[serde(default)]
	pub user: String,
	#[serde(default)]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
	#[serde(default)]
	pub password: String,
	#[serde(default)]
	pub schema_filter: String,
	#[serde(default = "default_connect_timeout")]
	pub connect_timeout_secs: u64,
	/// 0 disables the server side timeout
	#[serde(default = "default_statement_timeout")]
	pub statement_timeout_secs: u64,
}

fn default_port() -> u16 {
	DEFAULT_PORT
}

fn default_connect_timeout() -> u64 {
	10
}

fn default_statement_timeout() -> u64 {
	60
}

impl Default for ConnectionParameters {
	fn default() -> Self {
		ConnectionParameters {
			database_name: String::new(),
			user: String::new(),
			host: String::new(),
			port: default_port(),
			password: String::new(),
			schema_filter: String::new(),
			connect_timeout_secs: default_connect_timeout(),
			statement_timeout_secs: default_statement_timeout(),
		}
	}
}

impl ConnectionParameters {
	/// Reads parameters from a YAML file. Fields left out take their defaults
	pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|e| {
			ExtractError::Config(format!("cannot read {}: {}", path.display(), e))
		})?;
		Self::from_yaml_str(&text)
	}

	pub fn from_yaml_str(text: &str) -> Result<Self> {
		serde_yaml::from_str(text).map_err(|e| ExtractError::Config(format!("invalid connection file: {}", e)))
	}

	/// Checks the fields a connection cannot do without
	pub fn validate(&self) -> Result<()> {
		let missing: Vec<&str> = [
			("database name", &self.database_name),
			("user", &self.user),
			("host", &self.host),
		]
		.iter()
		.filter(|(_, v)| v.is_empty())
		.map(|(name, _)| *name)
		.collect();

		if !missing.is_empty() {
			return Err(ExtractError::Config(format!("missing {}", missing.join(", "))));
		}
		if self.port == 0 {
			return Err(ExtractError::Config("port must not be 0".to_owned()));
		}
		Ok(())
	}

	pub fn connect_timeout(&self) -> Duration {
		Duration::from_secs(self.connect_timeout_secs)
	}

	pub fn statement_timeout(&self) -> Option<Duration> {
		match self.statement_timeout_secs {
			0 => None,
			secs => Some(Duration::from_secs(secs)),
		}
	}
}

// the password never shows up in logs
impl fmt::Debug for ConnectionParameters {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConnectionParameters")
			.field("database_name", &self.database_name)
			.field("user", &self.user)
			.field("host", &self.host)
			.field("port", &self.port)
			.field("password", &"********")
			.field("schema_filter", &self.schema_filter)
			.field("connect_timeout_secs", &self.connect_timeout_secs)
			.field("statement_timeout_secs", &self.statement_timeout_secs)
			.finish()
	}
}
