//! Drives one extraction pass from connecting to the last written file

use std::{
	collections::HashSet,
	path::{Path, PathBuf},
};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
	config::ConnectionParameters,
	connection::{Catalog, CatalogSession},
	db_model::{kind_dir, schema_dir, Definition, DefinitionKind},
	error::{ExtractError, Result},
	functions,
	materialize::{ensure_directory, write_definition},
	schemas::list_schemas,
	tables,
};

/// What a finished pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
	pub schemas: usize,
	pub files: usize,
}

/// Runs routine and table passes against one database into one output directory
///
/// Every pass opens its own [`CatalogSession`] and works strictly one schema and one record at a time. The first error ends the pass; files written before it stay on disk
pub struct ExtractionOrchestrator {
	params: ConnectionParameters,
	output_dir: PathBuf,
	cancel: CancellationToken,
}

impl ExtractionOrchestrator {
	pub fn new(params: ConnectionParameters, output_dir: impl Into<PathBuf>) -> Self {
		ExtractionOrchestrator {
			params,
			output_dir: output_dir.into(),
			cancel: CancellationToken::new(),
		}
	}

	/// Checked before every schema and every record
	pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
		self.cancel = cancel;
		self
	}

	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	/// Writes `<output>/<schema>/functions/<name>_<arity>.sql` for every routine
	pub fn extract_functions(&self) -> Result<PassSummary> {
		self.run(DefinitionKind::Functions)
	}

	/// Writes `<output>/<schema>/tables/<name>.sql` for every table
	pub fn extract_tables(&self) -> Result<PassSummary> {
		self.run(DefinitionKind::Tables)
	}

	fn run(&self, kind: DefinitionKind) -> Result<PassSummary> {
		self.check_cancelled()?;
		let mut session = CatalogSession::open(&self.params)?;
		let outcome = self.run_pass(&mut session, kind);
		// the session goes away on both paths, a pass error wins over a close error
		let closed = session.close();
		let summary = outcome?;
		closed?;
		Ok(summary)
	}

	/// The pass itself, against any catalog
	pub fn run_pass<C: Catalog + ?Sized>(&self, catalog: &mut C, kind: DefinitionKind) -> Result<PassSummary> {
		info!("Processing {} started", kind);
		ensure_directory(&self.output_dir)?;

		let schemas = list_schemas(catalog, &self.params.schema_filter)?;
		if schemas.is_empty() {
			info!(filter = %self.params.schema_filter, "no schema matched");
		}

		let mut summary = PassSummary::default();
		for schema_name in &schemas {
			self.check_cancelled()?;
			ensure_directory(&schema_dir(&self.output_dir, schema_name))?;
			ensure_directory(&kind_dir(&self.output_dir, schema_name, kind))?;

			summary.files += match kind {
				DefinitionKind::Functions => self.materialize_all(&functions::extract(catalog, schema_name)?)?,
				DefinitionKind::Tables => self.materialize_all(&tables::extract(catalog, schema_name)?)?,
			};
			summary.schemas += 1;
		}

		info!(
			schemas = summary.schemas,
			files = summary.files,
			"Processing {} completed", kind
		);
		Ok(summary)
	}

	fn materialize_all<D: Definition>(&self, records: &[D]) -> Result<usize> {
		let total = records.len();
		let mut seen = HashSet::with_capacity(total);

		for (i, record) in records.iter().enumerate() {
			self.check_cancelled()?;
			info!("Processing {} {}/{}", D::KIND.item_name(), i + 1, total);

			let location = record.location(&self.output_dir);
			if !seen.insert(location.clone()) {
				warn!(
					path = %location.path().display(),
					"{} overwrites an earlier {} with the same file name",
					D::KIND.item_name(),
					D::KIND.item_name()
				);
			}
			debug!(path = %location.path().display(), "writing definition");
			write_definition(location.path(), record.definition_text())?;
		}
		Ok(total)
	}

	fn check_cancelled(&self) -> Result<()> {
		if self.cancel.is_cancelled() {
			return Err(ExtractError::Cancelled);
		}
		Ok(())
	}
}
