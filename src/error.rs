use std::path::PathBuf;

/// Library-level structured errors for replace-in-files.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ReplaceError {
	#[error("File or directory not found: {path}")]
	NotFound { path: PathBuf },

	#[error("Target path must not be empty")]
	EmptyPath,

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Invalid rule expression `{expression}`: {reason}")]
	InvalidExpression { expression: String, reason: String },

	#[error("Unknown replacement token: {name} (expected `file-name` or `file-path`)")]
	UnknownToken { name: String },

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Rule for pattern `{pattern}` needs either `replacement` or `token`")]
	MissingReplacement { pattern: String },
}

/// Result type alias using ReplaceError.
pub type Result<T> = std::result::Result<T, ReplaceError>;
