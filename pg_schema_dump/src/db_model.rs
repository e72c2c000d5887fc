//! Records produced by the extractors and the paths they are written to

use std::{
	fmt,
	path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};

pub type SchemaName = String;

/// Which subdirectory of a schema a pass writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
	Functions,
	Tables,
}

impl DefinitionKind {
	pub fn dir_name(self) -> &'static str {
		match self {
			DefinitionKind::Functions => "functions",
			DefinitionKind::Tables => "tables",
		}
	}

	/// Singular noun used in progress lines
	pub fn item_name(self) -> &'static str {
		match self {
			DefinitionKind::Functions => "function",
			DefinitionKind::Tables => "table",
		}
	}
}

impl fmt::Display for DefinitionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.dir_name())
	}
}

/// A record that ends up as one `.sql` file
pub trait Definition {
	const KIND: DefinitionKind;

	fn schema_name(&self) -> &str;
	/// File name without the `.sql` extension; only depends on the record's identity
	fn file_stem(&self) -> String;
	fn definition_text(&self) -> &str;

	fn location(&self, base_dir: &Path) -> OutputLocation {
		OutputLocation::new(base_dir, self.schema_name(), Self::KIND, &self.file_stem())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
	pub schema_name: SchemaName,
	pub routine_name: String,
	/// As printed by pg_get_function_arguments, `None` when the catalog returned NULL
	pub parameter_list: Option<String>,
	pub definition: String,
}

impl FunctionRecord {
	pub fn arity(&self) -> usize {
		arity(self.parameter_list.as_deref())
	}
}

impl Definition for FunctionRecord {
	const KIND: DefinitionKind = DefinitionKind::Functions;

	fn schema_name(&self) -> &str {
		&self.schema_name
	}
	fn file_stem(&self) -> String {
		format!("{}_{}", self.routine_name, self.arity())
	}
	fn definition_text(&self) -> &str {
		&self.definition
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
	pub schema_name: SchemaName,
	pub table_name: String,
	pub create_statement: String,
}

impl Definition for TableRecord {
	const KIND: DefinitionKind = DefinitionKind::Tables;

	fn schema_name(&self) -> &str {
		&self.schema_name
	}
	fn file_stem(&self) -> String {
		self.table_name.clone()
	}
	fn definition_text(&self) -> &str {
		&self.create_statement
	}
}

/// Number of comma separated parameters, ignoring empty pieces
pub fn arity(parameter_list: Option<&str>) -> usize {
	parameter_list
		.map(|params| params.split(',').filter(|p| !p.trim().is_empty()).count())
		.unwrap_or(0)
}

/// `<base>/<schema>/<kind>/<stem>.sql`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputLocation(PathBuf);

impl OutputLocation {
	pub fn new(base_dir: &Path, schema_name: &str, kind: DefinitionKind, file_stem: &str) -> Self {
		OutputLocation(
			kind_dir(base_dir, schema_name, kind).join(format!("{}.sql", path_component(file_stem))),
		)
	}

	pub fn path(&self) -> &Path {
		&self.0
	}

	pub fn into_path_buf(self) -> PathBuf {
		self.0
	}
}

impl AsRef<Path> for OutputLocation {
	fn as_ref(&self) -> &Path {
		&self.0
	}
}

pub fn schema_dir(base_dir: &Path, schema_name: &str) -> PathBuf {
	base_dir.join(path_component(schema_name))
}

pub fn kind_dir(base_dir: &Path, schema_name: &str, kind: DefinitionKind) -> PathBuf {
	schema_dir(base_dir, schema_name).join(kind.dir_name())
}

/// Makes a catalog name safe to use as exactly one path component
///
/// Names that had to change get the first 8 hex digits of their SHA-256 appended, so `a/b` and `a_b` stay apart
pub fn path_component(name: &str) -> String {
	let mut cleaned = name.replace(|c: char| c == '/' || c == '\\', "_");
	if let "" | "." | ".." = cleaned.as_str() {
		cleaned.insert(0, '_');
	}
	if cleaned == name {
		return cleaned;
	}
	let digest = format!("{:x}", Sha256::digest(name.as_bytes()));
	format!("{}_{}", cleaned, &digest[..8])
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(None, 0)]
	#[case(Some(""), 0)]
	#[case(Some("a int"), 1)]
	#[case(Some("a int, b text, c bool"), 3)]
	#[case(Some("integer, integer"), 2)]
	#[case(Some("  "), 0)]
	fn arity_counts_parameters(#[case] params: Option<&str>, #[case] expected: usize) {
		assert_eq!(arity(params), expected);
	}

	fn foo(params: &str) -> FunctionRecord {
		FunctionRecord {
			schema_name: "public".into(),
			routine_name: "foo".into(),
			parameter_list: Some(params.into()),
			definition: "CREATE OR REPLACE FUNCTION public.foo()".into(),
		}
	}

	#[test]
	fn function_location_uses_name_and_arity() {
		let loc = foo("a int, b int").location(Path::new("/backup"));
		assert_eq!(loc.path(), Path::new("/backup/public/functions/foo_2.sql"));
	}

	#[test]
	fn overloads_with_different_arity_get_different_files() {
		let base = Path::new("out");
		assert_ne!(foo("a int").location(base), foo("a int, b int").location(base));
	}

	#[test]
	fn location_ignores_definition_text() {
		let base = Path::new("out");
		let mut other = foo("a int");
		other.definition = "something else".into();
		assert_eq!(foo("a int").location(base), other.location(base));
	}

	#[test]
	fn table_location_uses_table_name() {
		let rec = TableRecord {
			schema_name: "public".into(),
			table_name: "users".into(),
			create_statement: "CREATE TABLE public.users(\nid integer NOT NULL);".into(),
		};
		assert_eq!(
			rec.location(Path::new("/backup")).into_path_buf(),
			PathBuf::from("/backup/public/tables/users.sql")
		);
	}

	#[rstest]
	#[case("a/b", "a_b_")]
	#[case("a\\b", "a_b_")]
	#[case("..", "_.._")]
	#[case(".", "_._")]
	#[case("", "__")]
	fn path_component_stays_inside_parent(#[case] name: &str, #[case] prefix: &str) {
		let component = path_component(name);
		assert!(component.starts_with(prefix), "{}", component);
		assert_eq!(component.len(), prefix.len() + 8);
		assert!(!component.contains('/') && !component.contains('\\'));
		assert_eq!(component, path_component(name));
	}

	#[test]
	fn safe_names_are_untouched() {
		assert_eq!(path_component("users"), "users");
		assert_eq!(path_component("a_b"), "a_b");
		assert_eq!(path_component("foo_2"), "foo_2");
	}

	#[test]
	fn sanitised_names_do_not_collide_with_lookalikes() {
		let base = Path::new("out");
		assert_ne!(schema_dir(base, "a/b"), schema_dir(base, "a_b"));
		assert_ne!(schema_dir(base, "a/b"), schema_dir(base, "a\\b"));

		let slash = TableRecord {
			schema_name: "public".into(),
			table_name: "a/b".into(),
			create_statement: String::new(),
		};
		let underscore = TableRecord {
			table_name: "a_b".into(),
			..slash.clone()
		};
		assert_ne!(slash.location(base), underscore.location(base));
		assert_eq!(underscore.location(base).path(), Path::new("out/public/tables/a_b.sql"));
	}
}
