use super::{Row, SqlError};


/// Converts from a [`postgres::Row`]. Implementations are provided for rows that contain a single text value (no check is done that the row only contained one value)
///
/// [`postgres::Row`]: https://docs.rs/postgres/0.19/postgres/row/struct.Row.html
///
/// The derive reads field `i` from column `i`
///
/// ```
/// use pg_schema_dump_core::*;
///
/// #[derive(TryFromRow)]
/// struct GetTable {
/// 	name: String,
/// 	create_statement: String,
/// }
/// ```
///
/// Tuple and unit structs are rejected
///
/// ```compile_fail
/// use pg_schema_dump_core::*;
///
/// #[derive(TryFromRow)]
/// struct GetTable(String, String);
/// ```
///
/// ```compile_fail
/// use pg_schema_dump_core::*;
///
/// #[derive(TryFromRow)]
/// struct Nothing;
/// ```
pub trait TryFromRow: Sized {
	fn from_row(row: &Row) -> Result<Self, SqlError>;
}

/// Provides an implementation of [`TryFromRow`] for a given type that implements [`FromSql`]
///
/// Reads column 0 only
///
/// [`TryFromRow`]: ./trait.TryFromRow.html
/// [`FromSql`]: https://docs.rs/postgres-types/0.2/postgres_types/trait.FromSql.html
macro_rules! try_from_row {
	($impl_type:ty) => {
		impl TryFromRow for $impl_type {
			fn from_row(row: &Row) -> Result<Self, SqlError> {
				row.try_get(0)
			}
		}
	};
}

try_from_row!(String);
