//! In-memory catalog shared by the integration tests

use std::collections::BTreeMap;

use pg_schema_dump::{connection::Catalog, ExtractError, GetFunctions, GetTables, Result};

#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
	pub functions: BTreeMap<String, Vec<GetFunctions>>,
	pub tables: BTreeMap<String, Vec<GetTables>>,
	/// Schema whose table query fails
	pub broken_schema: Option<String>,
	pub queries: Vec<String>,
}

impl MemoryCatalog {
	pub fn with_function(mut self, schema: &str, name: &str, arguments: Option<&str>, definition: &str) -> Self {
		self.tables.entry(schema.to_owned()).or_default();
		self.functions.entry(schema.to_owned()).or_default().push(GetFunctions {
			name: name.to_owned(),
			arguments: arguments.map(str::to_owned),
			definition: definition.to_owned(),
		});
		self
	}

	pub fn with_table(mut self, schema: &str, name: &str, create_statement: &str) -> Self {
		self.functions.entry(schema.to_owned()).or_default();
		self.tables.entry(schema.to_owned()).or_default().push(GetTables {
			name: name.to_owned(),
			create_statement: create_statement.to_owned(),
		});
		self
	}
}

impl Catalog for MemoryCatalog {
	fn schema_names(&mut self, filter: &str) -> Result<Vec<String>> {
		self.queries.push(format!("schemas({})", filter));
		// unsorted on purpose, the enumerator has to order them
		Ok(self.functions.keys().rev().cloned().collect())
	}

	fn function_rows(&mut self, schema_name: &str) -> Result<Vec<GetFunctions>> {
		self.queries.push(format!("functions({})", schema_name));
		Ok(self.functions.get(schema_name).cloned().unwrap_or_default())
	}

	fn table_rows(&mut self, schema_name: &str) -> Result<Vec<GetTables>> {
		self.queries.push(format!("tables({})", schema_name));
		if self.broken_schema.as_deref() == Some(schema_name) {
			return Err(ExtractError::Config(format!("catalog for {} unavailable", schema_name)));
		}
		Ok(self.tables.get(schema_name).cloned().unwrap_or_default())
	}
}
