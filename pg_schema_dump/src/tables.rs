//! Table DDL of one schema

use crate::{
	connection::Catalog,
	db_model::TableRecord,
	error::Result,
};

/// One record per table holding the CREATE TABLE text the catalog query assembled
pub fn extract<C: Catalog + ?Sized>(catalog: &mut C, schema_name: &str) -> Result<Vec<TableRecord>> {
	let rows = catalog.table_rows(schema_name)?;
	Ok(rows
		.into_iter()
		.map(|row| TableRecord {
			schema_name: schema_name.to_owned(),
			table_name: row.name,
			create_statement: row.create_statement,
		})
		.collect())
}
