//! Routine definitions of one schema

use crate::{
	connection::Catalog,
	db_model::FunctionRecord,
	error::Result,
};

/// Every routine of `schema_name` in the order the catalog returns them
///
/// The whole result set is read before any record is built
pub fn extract<C: Catalog + ?Sized>(catalog: &mut C, schema_name: &str) -> Result<Vec<FunctionRecord>> {
	let rows = catalog.function_rows(schema_name)?;
	Ok(rows
		.into_iter()
		.map(|row| FunctionRecord {
			schema_name: schema_name.to_owned(),
			routine_name: row.name,
			parameter_list: row.arguments,
			definition: row.definition,
		})
		.collect())
}
