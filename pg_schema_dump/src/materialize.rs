//! Writing definition files

use std::{
	fs,
	io::Write,
	path::Path,
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExtractError, Result};

/// Creates `path` and any missing parents. An existing directory is fine
pub fn ensure_directory(path: &Path) -> Result<()> {
	fs::create_dir_all(path).map_err(|e| ExtractError::file_system(path, e))
}

/// Replaces whatever is at `path` with exactly `text`
///
/// The text goes to a temporary file next to `path` first, so a crash never leaves a half written definition behind. The temporary file is removed again if anything fails
pub fn write_definition(path: &Path, text: &str) -> Result<()> {
	let dir = path.parent().unwrap_or_else(|| Path::new("."));

	let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ExtractError::file_system(dir, e))?;
	tmp.write_all(text.as_bytes())
		.and_then(|_| tmp.as_file().sync_all())
		.map_err(|e| ExtractError::file_system(tmp.path(), e))?;

	if path.exists() {
		debug!(path = %path.display(), "replacing existing file");
		fs::remove_file(path).map_err(|e| ExtractError::file_system(path, e))?;
	}
	tmp.persist(path).map_err(|e| ExtractError::file_system(path, e.error))?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn file_names(dir: &Path) -> Vec<String> {
		let mut names: Vec<_> = fs::read_dir(dir)
			.unwrap()
			.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
			.collect();
		names.sort();
		names
	}

	#[test]
	fn ensure_directory_is_idempotent() {
		let tmp = TempDir::new().unwrap();
		let dir = tmp.path().join("public").join("functions");
		ensure_directory(&dir).unwrap();
		ensure_directory(&dir).unwrap();
		assert!(dir.is_dir());
	}

	#[test]
	fn writing_twice_keeps_one_copy_of_the_text() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("users.sql");
		let ddl = "CREATE TABLE public.users(\nid integer NOT NULL);";

		write_definition(&path, ddl).unwrap();
		write_definition(&path, ddl).unwrap();

		assert_eq!(fs::read_to_string(&path).unwrap(), ddl);
		assert_eq!(file_names(tmp.path()), ["users.sql"]);
	}

	#[test]
	fn shorter_text_fully_replaces_longer_file() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("foo_1.sql");
		fs::write(&path, "-- a much longer hand edited body that should disappear").unwrap();

		write_definition(&path, "short").unwrap();

		assert_eq!(fs::read_to_string(&path).unwrap(), "short");
	}

	#[test]
	fn missing_directory_is_a_file_system_error() {
		let tmp = TempDir::new().unwrap();
		let path = tmp.path().join("nope").join("foo_0.sql");

		let err = write_definition(&path, "x").unwrap_err();

		assert!(matches!(err, ExtractError::FileSystem { .. }));
		assert_eq!(err.exit_code(), 4);
	}
}
