//! Where a run writes to

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

/// `<base>/backup_<month>_<day>_<year>`, month and day without padding
///
/// The date is handed in by the caller, usually the local date at start up
pub fn output_root(base_dir: &Path, run_date: NaiveDate) -> PathBuf {
	base_dir.join(format!(
		"backup_{}_{}_{}",
		run_date.month(),
		run_date.day(),
		run_date.year()
	))
}
