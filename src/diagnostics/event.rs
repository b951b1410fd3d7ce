use std::fmt;
use std::path::PathBuf;

/// A structured event reported while registering targets, scanning or rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// A file or directory was registered as a target.
	TargetAdded { path: PathBuf },

	/// All rules were applied to a file.
	FileReplaced { path: PathBuf },

	/// An entry was skipped because it cannot be read.
	Unreadable { path: PathBuf },

	/// A regular file was found during a directory scan.
	FileFound { path: PathBuf },

	/// A file was overwritten.
	FileWritten { path: PathBuf },

	/// A file was read into memory.
	FileRead { path: PathBuf },

	/// A hidden file was skipped during a directory scan.
	HiddenFileSkipped { path: PathBuf },

	/// A hidden directory (and its subtree) was skipped.
	HiddenDirectorySkipped { path: PathBuf },

	/// A substitution rule was registered.
	RuleAdded { pattern: String, replacement: String },

	/// A target path does not exist.
	TargetNotFound { path: PathBuf },

	/// Reading a file failed.
	ReadFailed { path: PathBuf, error: String },

	/// Writing a file failed.
	WriteFailed { path: PathBuf, error: String },

	/// Walking a directory failed part way.
	ScanFailed { path: PathBuf, error: String },
}

impl Diagnostic {
	/// Stable numeric identifier for this kind of event.
	pub fn code(&self) -> u32 {
		match self {
			Diagnostic::TargetAdded { .. } => 1,
			Diagnostic::FileReplaced { .. } => 3,
			Diagnostic::Unreadable { .. } => 4,
			Diagnostic::FileFound { .. } => 5,
			Diagnostic::FileWritten { .. } => 6,
			Diagnostic::FileRead { .. } => 7,
			Diagnostic::HiddenFileSkipped { .. } => 8,
			Diagnostic::HiddenDirectorySkipped { .. } => 9,
			Diagnostic::RuleAdded { .. } => 10,
			Diagnostic::TargetNotFound { .. } => 40001,
			Diagnostic::ReadFailed { .. } => 50001,
			Diagnostic::WriteFailed { .. } => 50002,
			Diagnostic::ScanFailed { .. } => 50003,
		}
	}

	/// Whether this event describes a failure rather than progress.
	pub fn is_failure(&self) -> bool {
		self.code() >= 40000
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Diagnostic::TargetAdded { path } => write!(f, "added target {}", path.display()),
			Diagnostic::FileReplaced { path } => {
				write!(f, "applied rules to {}", path.display())
			}
			Diagnostic::Unreadable { path } => write!(f, "cannot read {}", path.display()),
			Diagnostic::FileFound { path } => write!(f, "found file {}", path.display()),
			Diagnostic::FileWritten { path } => write!(f, "wrote {}", path.display()),
			Diagnostic::FileRead { path } => write!(f, "read {}", path.display()),
			Diagnostic::HiddenFileSkipped { path } => {
				write!(f, "skipped hidden file {}", path.display())
			}
			Diagnostic::HiddenDirectorySkipped { path } => {
				write!(f, "skipped hidden directory {}", path.display())
			}
			Diagnostic::RuleAdded {
				pattern,
				replacement,
			} => write!(f, "added rule `{pattern}` -> {replacement}"),
			Diagnostic::TargetNotFound { path } => write!(f, "not found: {}", path.display()),
			Diagnostic::ReadFailed { path, error } => {
				write!(f, "failed to read {}: {error}", path.display())
			}
			Diagnostic::WriteFailed { path, error } => {
				write!(f, "failed to write {}: {error}", path.display())
			}
			Diagnostic::ScanFailed { path, error } => {
				write!(f, "failed to scan {}: {error}", path.display())
			}
		}
	}
}
