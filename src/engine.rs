//! The replacement engine: target registration, rule registration and apply.

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{Result, ReplaceError};
use crate::files::FileAccess;
use crate::rules::{Replacement, Rule, RuleSet, Token};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of one [`ReplacementEngine::apply`] run.
#[derive(Debug, Default)]
pub struct ApplySummary {
	/// Targets whose rewritten content was written back.
	pub rewritten: Vec<PathBuf>,

	/// Targets that could not be read or written, with the error message.
	pub failed: Vec<(PathBuf, String)>,
}

impl ApplySummary {
	pub fn is_success(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Applies an ordered set of regex rules to a set of files, in place.
#[derive(Debug)]
pub struct ReplacementEngine {
	files: FileAccess,
	targets: Vec<PathBuf>,
	seen: HashSet<PathBuf>,
	rules: RuleSet,
}

impl Default for ReplacementEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl ReplacementEngine {
	/// Create an engine that reports through `tracing`.
	pub fn new() -> Self {
		Self::with_sink(Arc::new(TracingSink))
	}

	pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
		Self {
			files: FileAccess::new(sink),
			targets: Vec::new(),
			seen: HashSet::new(),
			rules: RuleSet::new(),
		}
	}

	/// Include hidden files and directories in later directory expansions.
	pub fn set_allow_hidden(&mut self, allow_hidden: bool) -> &mut Self {
		self.files.set_allow_hidden(allow_hidden);
		self
	}

	pub fn allow_hidden(&self) -> bool {
		self.files.allow_hidden()
	}

	/// Register a file, or every file found under a directory.
	///
	/// The target list is a snapshot: directories are expanded now, not at apply time.
	pub fn add_target(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
		let path = path.as_ref();

		if path.as_os_str().is_empty() {
			return Err(ReplaceError::EmptyPath);
		}

		if !path.exists() {
			self.files.report(Diagnostic::TargetNotFound {
				path: path.to_path_buf(),
			});
			return Err(ReplaceError::NotFound {
				path: path.to_path_buf(),
			});
		}

		let found = if path.is_file() {
			vec![path.to_path_buf()]
		} else {
			self.files.scan_directory(path)
		};

		// A file reached twice (overlapping registrations) keeps its first slot
		for file in found {
			if self.seen.insert(file.clone()) {
				self.targets.push(file);
			}
		}

		self.files.report(Diagnostic::TargetAdded {
			path: path.to_path_buf(),
		});

		Ok(self)
	}

	/// Register `pattern` with a literal replacement.
	pub fn add_rule(&mut self, pattern: &str, replacement: &str) -> Result<&mut Self> {
		self.add_replacement(pattern, Replacement::Literal(replacement.to_string()))
	}

	/// Register `pattern` with a per-file token replacement.
	pub fn add_token_rule(&mut self, pattern: &str, token: Token) -> Result<&mut Self> {
		self.add_replacement(pattern, token.into())
	}

	/// Register `pattern`; an existing rule for it keeps its position.
	pub fn add_replacement(
		&mut self,
		pattern: &str,
		replacement: Replacement,
	) -> Result<&mut Self> {
		let rule = Rule::new(pattern, replacement)?;

		self.files.report(Diagnostic::RuleAdded {
			pattern: pattern.to_string(),
			replacement: rule.replacement.to_string(),
		});

		self.rules.insert(rule);

		Ok(self)
	}

	/// Registered targets, in registration order, each listed once.
	pub fn targets(&self) -> &[PathBuf] {
		&self.targets
	}

	pub fn rules(&self) -> &RuleSet {
		&self.rules
	}

	/// Rewrite every target with every rule.
	///
	/// Each file is read, passed through the rules in order and written back.
	/// A file that fails to read is left untouched; a failure on one file
	/// never stops the rest.
	pub fn apply(&self) -> ApplySummary {
		let mut summary = ApplySummary::default();

		for path in &self.targets {
			let content = match self.files.try_read(path) {
				Ok(content) => content,
				Err(e) => {
					self.files.report(Diagnostic::ReadFailed {
						path: path.clone(),
						error: e.to_string(),
					});
					summary.failed.push((path.clone(), e.to_string()));
					continue;
				}
			};

			let replaced = self.rules.apply_all(content, path);

			self.files.report(Diagnostic::FileReplaced { path: path.clone() });

			match self.files.try_write(path, &replaced) {
				Ok(()) => summary.rewritten.push(path.clone()),
				Err(e) => {
					self.files.report(Diagnostic::WriteFailed {
						path: path.clone(),
						error: e.to_string(),
					});
					summary.failed.push((path.clone(), e.to_string()));
				}
			}
		}

		summary
	}
}
