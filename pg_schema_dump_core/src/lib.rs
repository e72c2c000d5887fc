#![forbid(unsafe_code)]
//! Helper types for turning PostgreSQL catalog rows into typed records
//!
//! Provides the [`TryFromRow`] trait which converts from a [`postgres::Row`], along with a derive macro of the same name that maps struct fields to row columns in declaration order
//!
//! Reexports [`postgres::Error`] as SqlError (the Result::Err of the return from [`TryFromRow::from_row`]) and [`postgres::Row`]
//!
//! [`postgres::Error`]: https://docs.rs/postgres/0.19/postgres/error/struct.Error.html
//! [`postgres::Row`]: https://docs.rs/postgres/0.19/postgres/row/struct.Row.html
//! [`TryFromRow::from_row`]: ./trait.TryFromRow.html#tymethod.from_row
//! [`TryFromRow`]: ./trait.TryFromRow.html

//reexports
pub use pg_schema_dump_derive::TryFromRow;
pub use postgres::{Error as SqlError, Row};

/// Implementation of `TryFromRow` for single value rows
mod try_from_row;
pub use try_from_row::TryFromRow;
