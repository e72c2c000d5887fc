use super::{
	config::ConnectionParameters,
	error::{ExtractError, Result},
	pg_select_types::*,
};
use pg_schema_dump_core::*;
use postgres::{Client, Config, NoTls, Statement};
use tracing::{debug, info};

/// Read-only view of the system catalog used by the extractors
///
/// [`CatalogSession`] is the PostgreSQL implementation; every method is one query and returns rows in the order the query produced them
pub trait Catalog {
	/// Schema names matching `filter` exactly, or all of them when `filter` is empty
	fn schema_names(&mut self, filter: &str) -> Result<Vec<String>>;
	fn function_rows(&mut self, schema_name: &str) -> Result<Vec<GetFunctions>>;
	fn table_rows(&mut self, schema_name: &str) -> Result<Vec<GetTables>>;
}

/// One connection to the database for the length of a single extraction pass
///
/// Dropping the session also closes the connection, [`CatalogSession::close`] just reports errors from doing so
pub struct CatalogSession {
	client: Client,
	schemas_stmt : Statement,
	functions_stmt : Statement,
	tables_stmt : Statement,
}

impl CatalogSession {
	pub fn open(params: &ConnectionParameters) -> Result<CatalogSession> {
		params.validate()?;

		let mut config = Config::new();
		config
			.host(&params.host)
			.port(params.port)
			.dbname(&params.database_name)
			.user(&params.user)
			.application_name(env!("CARGO_PKG_NAME"))
			.connect_timeout(params.connect_timeout());
		if !params.password.is_empty() {
			config.password(&params.password);
		}
		if let Some(timeout) = params.statement_timeout() {
			config.options(&format!("-c statement_timeout={}", timeout.as_millis()));
		}

		let mut client = config.connect(NoTls).map_err(ExtractError::Connection)?;
		info!(
			"Connected to PostgreSQL: {}:{}/{}",
			params.host, params.port, params.database_name
		);

		Ok(CatalogSession {
			schemas_stmt : prepare(&mut client, GET_SCHEMAS)?,
			functions_stmt : prepare(&mut client, GET_FUNCTIONS)?,
			tables_stmt : prepare(&mut client, GET_TABLES)?,
			client,
		})
	}

	pub fn close(self) -> Result<()> {
		self.client.close().map_err(ExtractError::Connection)?;
		debug!("catalog session closed");
		Ok(())
	}
}

fn prepare(client: &mut Client, query: &str) -> Result<Statement> {
	client
		.prepare(query)
		.map_err(|e| ExtractError::query("preparing catalog statements", e))
}

/// Wrappers on SQL select statements
impl Catalog for CatalogSession {
	fn schema_names(&mut self, filter: &str) -> Result<Vec<String>> {
		debug!(filter, "listing schemas");
		self.client
			.query(&self.schemas_stmt, &[&filter])
			.and_then(|rows| rows.iter().map(TryFromRow::from_row).collect())
			.map_err(|e| ExtractError::query("listing schemas", e))
	}
	fn function_rows(&mut self, schema_name: &str) -> Result<Vec<GetFunctions>> {
		debug!(schema = schema_name, "querying functions");
		self.client
			.query(&self.functions_stmt, &[&schema_name])
			.and_then(|rows| rows.iter().map(TryFromRow::from_row).collect())
			.map_err(|e| ExtractError::query(format!("reading functions of schema {}", schema_name), e))
	}
	fn table_rows(&mut self, schema_name: &str) -> Result<Vec<GetTables>> {
		debug!(schema = schema_name, "querying tables");
		self.client
			.query(&self.tables_stmt, &[&schema_name])
			.and_then(|rows| rows.iter().map(TryFromRow::from_row).collect())
			.map_err(|e| ExtractError::query(format!("reading tables of schema {}", schema_name), e))
	}
}
