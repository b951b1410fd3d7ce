//! File access for replace-in-files.
//!
//! This module handles:
//! - Whole-file reads and overwrites with best-effort failure handling
//! - Recursive directory scanning with a hidden-entry policy

pub mod scan;

pub use scan::is_hidden;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reads, writes and discovers target files, reporting to a diagnostic sink.
#[derive(Clone)]
pub struct FileAccess {
	sink: Arc<dyn DiagnosticSink>,
	allow_hidden: bool,
}

impl Default for FileAccess {
	fn default() -> Self {
		Self::new(Arc::new(TracingSink))
	}
}

impl std::fmt::Debug for FileAccess {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FileAccess")
			.field("allow_hidden", &self.allow_hidden)
			.finish_non_exhaustive()
	}
}

impl FileAccess {
	/// Create file access that excludes hidden entries.
	pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
		Self {
			sink,
			allow_hidden: false,
		}
	}

	/// Whether hidden files and directories are included in scans.
	pub fn allow_hidden(&self) -> bool {
		self.allow_hidden
	}

	pub fn set_allow_hidden(&mut self, allow_hidden: bool) -> &mut Self {
		self.allow_hidden = allow_hidden;
		self
	}

	pub(crate) fn report(&self, event: Diagnostic) {
		self.sink.report(&event);
	}

	/// Read the whole file as raw bytes.
	pub fn try_read(&self, path: &Path) -> io::Result<Vec<u8>> {
		let bytes = fs::read(path)?;
		self.report(Diagnostic::FileRead {
			path: path.to_path_buf(),
		});
		Ok(bytes)
	}

	/// Truncate the file and write `content` in its place.
	pub fn try_write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
		fs::write(path, content)?;
		self.report(Diagnostic::FileWritten {
			path: path.to_path_buf(),
		});
		Ok(())
	}

	/// Read the whole file. Failures are reported and yield empty content.
	pub fn read_file(&self, path: &Path) -> Vec<u8> {
		self.try_read(path).unwrap_or_else(|e| {
			self.report(Diagnostic::ReadFailed {
				path: path.to_path_buf(),
				error: e.to_string(),
			});
			Vec::new()
		})
	}

	/// Overwrite the file with `content`. Failures are reported and dropped.
	pub fn write_file(&self, path: &Path, content: &[u8]) {
		if let Err(e) = self.try_write(path, content) {
			self.report(Diagnostic::WriteFailed {
				path: path.to_path_buf(),
				error: e.to_string(),
			});
		}
	}

	/// Truncate the file to empty.
	pub fn clean_file(&self, path: &Path) {
		self.write_file(path, b"");
	}

	/// List every regular file reachable from `root`, depth first.
	pub fn scan_directory(&self, root: &Path) -> Vec<PathBuf> {
		scan::scan_directory(self, root)
	}
}
