use crate::error::{Result, ReplaceError};
use crate::rules::replacement::Replacement;
use regex::bytes::{NoExpand, Regex};
use std::path::Path;

/// A compiled substitution rule.
#[derive(Debug, Clone)]
pub struct Rule {
	/// The pattern source, also the rule's key in a [`RuleSet`].
	pub pattern: String,

	/// Compiled pattern regex, matched against raw file bytes.
	pub regex: Regex,

	pub replacement: Replacement,
}

impl Rule {
	/// Compile a rule from a pattern string.
	pub fn new(pattern: &str, replacement: Replacement) -> Result<Self> {
		let regex = Regex::new(pattern).map_err(|source| ReplaceError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(Rule {
			pattern: pattern.to_string(),
			regex,
			replacement,
		})
	}

	/// Replace every non-overlapping match in `input`, resolving tokens against `path`.
	///
	/// Replacement text is inserted literally: `$1` stays `$1`.
	pub fn apply(&self, input: &[u8], path: &Path) -> Vec<u8> {
		let replacement = self.replacement.resolve(path);
		self.regex
			.replace_all(input, NoExpand(replacement.as_ref()))
			.into_owned()
	}
}

/// Rules keyed by pattern, in first-registration order.
///
/// Inserting an existing pattern replaces its value without moving it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or overwrite the rule for `rule.pattern`.
	///
	/// Returns the replacement previously stored for the pattern.
	pub fn insert(&mut self, rule: Rule) -> Option<Replacement> {
		match self.rules.iter_mut().find(|r| r.pattern == rule.pattern) {
			Some(existing) => Some(std::mem::replace(existing, rule).replacement),
			None => {
				self.rules.push(rule);
				None
			}
		}
	}

	pub fn get(&self, pattern: &str) -> Option<&Rule> {
		self.rules.iter().find(|r| r.pattern == pattern)
	}

	/// Rules in application order.
	pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
		self.rules.iter()
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Run every rule in order, each on the previous rule's output.
	pub fn apply_all(&self, content: Vec<u8>, path: &Path) -> Vec<u8> {
		self.rules
			.iter()
			.fold(content, |buffer, rule| rule.apply(&buffer, path))
	}
}

impl<'a> IntoIterator for &'a RuleSet {
	type Item = &'a Rule;
	type IntoIter = std::slice::Iter<'a, Rule>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
