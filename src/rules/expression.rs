use crate::error::{Result, ReplaceError};
use crate::rules::replacement::Replacement;

/// A rule given on the command line in sed-like form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
	/// The regex pattern source.
	pub pattern: String,

	/// The replacement, with token flags already applied.
	pub replacement: Replacement,
}

impl Expression {
	/// Parse an expression in the format `s/pattern/replacement/flags`.
	///
	/// Any character after `s` is the delimiter, and `\` escapes it inside
	/// the pattern or replacement. Flags:
	/// - `g`: accepted for familiarity; replacement is always global
	/// - `n`: replace with the target's file name
	/// - `p`: replace with the target's full path
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = |reason: &str| ReplaceError::InvalidExpression {
			expression: input.to_string(),
			reason: reason.to_string(),
		};

		let mut chars = input.chars();
		if chars.next() != Some('s') {
			return Err(invalid("expression must start with 's'"));
		}

		let Some(delimiter) = chars.next() else {
			return Err(invalid("expression too short"));
		};

		if delimiter.is_alphanumeric() || delimiter == '\\' {
			return Err(invalid("delimiter must be punctuation"));
		}

		let parts = split_by_delimiter(chars.as_str(), delimiter);

		if parts.len() < 2 {
			return Err(invalid("expression must have pattern and replacement"));
		}
		if parts.len() > 3 {
			return Err(invalid("unescaped delimiter after flags"));
		}

		let pattern = parts[0].clone();
		let text = parts[1].clone();
		let flags = parts.get(2).map(String::as_str).unwrap_or("");

		let mut token = None;
		for flag in flags.chars() {
			match flag {
				'g' => {}
				'n' | 'p' if token.is_some() => {
					return Err(invalid("flags `n` and `p` are mutually exclusive"));
				}
				'n' => token = Some(Replacement::FileName),
				'p' => token = Some(Replacement::FilePath),
				_ => return Err(invalid(&format!("unknown flag `{flag}`"))),
			}
		}

		let replacement = match token {
			Some(_) if !text.is_empty() => {
				return Err(invalid("token flags need an empty replacement"));
			}
			Some(token) => token,
			None => Replacement::Literal(text),
		};

		Ok(Expression {
			pattern,
			replacement,
		})
	}
}

/// Split a string by a delimiter, respecting backslash escapes.
fn split_by_delimiter(input: &str, delimiter: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut chars = input.chars().peekable();

	while let Some(c) = chars.next() {
		if c == '\\' && chars.peek() == Some(&delimiter) {
			// Escaped delimiter is kept as the bare character
			current.push(delimiter);
			chars.next();
		} else if c == delimiter {
			parts.push(std::mem::take(&mut current));
		} else {
			current.push(c);
		}
	}

	parts.push(current);

	parts
}
