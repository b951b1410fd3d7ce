use crate::error::{Result, ReplaceError};
use crate::rules::{Replacement, Token};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.replace-in-files.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleFile {
	/// If true, hidden files and directories are included in directory scans.
	#[serde(default)]
	pub hidden: bool,

	/// Files or directories to rewrite, relative to the rule file's directory.
	#[serde(default)]
	pub targets: Vec<PathBuf>,

	/// Substitution rules, applied in file order.
	#[serde(default)]
	pub rules: Vec<RuleEntry>,
}

/// A single substitution rule as written in a rule file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct RuleEntry {
	/// Regex pattern to match.
	pub pattern: String,

	/// Literal replacement text (mutually exclusive with token).
	pub replacement: Option<String>,

	/// Per-file token: `file-name` or `file-path` (mutually exclusive with replacement).
	pub token: Option<String>,
}

/// A loaded rule file with its source path for display.
#[derive(Debug, Clone)]
pub struct LoadedRuleFile {
	/// The parsed rule file.
	pub config: RuleFile,

	/// The path this rule file was loaded from.
	pub path: PathBuf,
}

impl RuleEntry {
	/// Resolve the entry's replacement, checking that exactly one kind is set.
	pub fn replacement(&self) -> Result<Replacement> {
		match (&self.replacement, &self.token) {
			(Some(_), Some(_)) => Err(ReplaceError::MutuallyExclusive {
				option1: "replacement".to_string(),
				option2: "token".to_string(),
			}),
			(Some(text), None) => Ok(Replacement::Literal(text.clone())),
			(None, Some(name)) => Ok(Token::parse(name)?.into()),
			(None, None) => Err(ReplaceError::MissingReplacement {
				pattern: self.pattern.clone(),
			}),
		}
	}
}

impl RuleFile {
	/// Validate all rules in this file.
	pub fn validate(&self) -> Result<()> {
		for rule in &self.rules {
			rule.replacement()?;
		}
		Ok(())
	}
}
