//! Error types for catalog extraction.

use std::path::{Path, PathBuf};

use pg_schema_dump_core::SqlError;
use postgres::error::SqlState;
use thiserror::Error;

/// Everything that can end an extraction pass.
#[derive(Error, Debug)]
pub enum ExtractError {
	/// The catalog session could not be established or was lost
	#[error("Connection error: {0}")]
	Connection(#[source] SqlError),

	/// A metadata query failed or returned rows that could not be read
	#[error("Query failed while {context}: {source}")]
	Query {
		context: String,
		#[source]
		source: SqlError,
	},

	/// Directory creation or file write failed
	#[error("File system error at {}: {source}", path.display())]
	FileSystem {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Missing or invalid connection settings
	#[error("Configuration error: {0}")]
	Config(String),

	/// The cancellation token fired between two steps of a pass
	#[error("Extraction cancelled")]
	Cancelled,
}

impl ExtractError {
	/// Wraps a failed query. A dropped or terminated connection is reported as [`ExtractError::Connection`]
	pub fn query(context: impl Into<String>, source: SqlError) -> Self {
		if connection_lost(&source) {
			ExtractError::Connection(source)
		} else {
			ExtractError::Query {
				context: context.into(),
				source,
			}
		}
	}

	pub fn file_system(path: impl AsRef<Path>, source: std::io::Error) -> Self {
		ExtractError::FileSystem {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}

	/// Process exit status for this error; distinct per error kind
	pub fn exit_code(&self) -> u8 {
		match self {
			ExtractError::Connection(_) => 2,
			ExtractError::Query { .. } => 3,
			ExtractError::FileSystem { .. } => 4,
			ExtractError::Config(_) => 5,
			ExtractError::Cancelled => 130,
		}
	}

	/// Format error with full details including error chain
	pub fn format_detailed(&self) -> String {
		let mut output = format!("Error: {}\n", self);

		let mut source = std::error::Error::source(self);
		let mut depth = 1;
		while let Some(err) = source {
			output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
			source = err.source();
			depth += 1;
		}

		output
	}
}

/// Closed by the client, a connection exception (class 08), or the server shutting the backend down
fn connection_lost(err: &SqlError) -> bool {
	err.is_closed() ||
		err.code().map_or(false, |state| {
			state.code().starts_with("08") ||
				*state == SqlState::ADMIN_SHUTDOWN ||
				*state == SqlState::CRASH_SHUTDOWN
		})
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
