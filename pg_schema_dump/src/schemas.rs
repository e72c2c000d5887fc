//! Resolves which schemas a pass walks through

use crate::{
	connection::Catalog,
	db_model::SchemaName,
	error::Result,
};

/// Schemas to process, ascending and without duplicates
///
/// An empty `filter` means every schema. Otherwise the result is `[filter]` when a schema with exactly that name exists and empty when none does
pub fn list_schemas<C: Catalog + ?Sized>(catalog: &mut C, filter: &str) -> Result<Vec<SchemaName>> {
	let names = catalog.schema_names(filter)?;
	Ok(select_schemas(names, filter))
}

/// Applies the exact-name filter and puts names in byte order, independent of server collation
pub fn select_schemas(mut names: Vec<SchemaName>, filter: &str) -> Vec<SchemaName> {
	if !filter.is_empty() {
		names.retain(|name| name == filter);
	}
	names.sort();
	names.dedup();
	names
}

#[cfg(test)]
mod tests {
	use super::*;

	fn names(list: &[&str]) -> Vec<SchemaName> {
		list.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn empty_filter_keeps_everything_sorted() {
		let got = select_schemas(names(&["public", "audit", "pg_catalog", "audit"]), "");
		assert_eq!(got, names(&["audit", "pg_catalog", "public"]));
	}

	#[test]
	fn filter_is_exact_and_case_sensitive() {
		let all = names(&["Reporting", "reporting_old", "public"]);
		assert!(select_schemas(all.clone(), "reporting").is_empty());
		assert_eq!(select_schemas(all, "Reporting"), names(&["Reporting"]));
	}

	#[test]
	fn filter_is_not_a_pattern() {
		assert!(select_schemas(names(&["public", "pub_2"]), "pub%").is_empty());
	}
}
