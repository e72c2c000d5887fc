//! Select statments into the catalog and corresponding row types
use pg_schema_dump_core::*;


/// `$1` is the schema filter; an empty string matches every schema
pub const GET_SCHEMAS: &str = "SELECT schema_name::text
FROM information_schema.schemata
WHERE CASE WHEN $1::text = '' THEN true ELSE schema_name::text = $1::text END
ORDER BY schema_name ASC";

/// Routines of one schema in catalog order. Aggregates are skipped as pg_get_functiondef rejects them
pub const GET_FUNCTIONS: &str = "SELECT p.proname::text,
	pg_catalog.pg_get_function_arguments(p.oid),
	pg_catalog.pg_get_functiondef(p.oid)
FROM pg_catalog.pg_namespace n
JOIN pg_catalog.pg_proc p
	ON p.pronamespace = n.oid
WHERE n.nspname = $1 AND
	p.prokind <> 'a'";
#[derive(Debug, Clone, PartialEq, Eq, TryFromRow)]
pub struct GetFunctions {
	pub name: String,
	pub arguments: Option<String>,
	pub definition: String,
}

/// One CREATE TABLE statement per ordinary or partitioned table, built entirely server side
pub const GET_TABLES: &str = "SELECT pc.relname::text,
	'CREATE TABLE ' || pn.nspname || '.' || pc.relname || E'(\\n' ||
	string_agg(
		pa.attname || ' ' || pg_catalog.format_type(pa.atttypid, pa.atttypmod) ||
		coalesce(' DEFAULT ' || (
			SELECT pg_catalog.pg_get_expr(d.adbin, d.adrelid)
			FROM pg_catalog.pg_attrdef d
			WHERE d.adrelid = pa.attrelid AND d.adnum = pa.attnum AND pa.atthasdef
		), '') || ' ' ||
		CASE pa.attnotnull WHEN TRUE THEN 'NOT NULL' ELSE 'NULL' END,
		E',\\n' ORDER BY pa.attnum
	) ||
	coalesce((
		SELECT E',\\n' || string_agg('CONSTRAINT ' || pc1.conname || ' ' || pg_catalog.pg_get_constraintdef(pc1.oid), E',\\n' ORDER BY pc1.conindid)
		FROM pg_catalog.pg_constraint pc1
		WHERE pc1.conrelid = pa.attrelid
	), '') ||
	E');'
FROM pg_catalog.pg_attribute pa
JOIN pg_catalog.pg_class pc
	ON pc.oid = pa.attrelid
JOIN pg_catalog.pg_namespace pn
	ON pn.oid = pc.relnamespace
	AND pn.nspname = $1
WHERE pa.attnum > 0 AND
	NOT pa.attisdropped AND
	pc.relkind IN ('r', 'p')
GROUP BY pn.nspname, pc.relname, pa.attrelid
ORDER BY pc.relname ASC";
#[derive(Debug, Clone, PartialEq, Eq, TryFromRow)]
pub struct GetTables {
	pub name: String,
	pub create_statement: String,
}
