use crate::error::{Result, ReplaceError};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// A value computed from the file a rule is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
	/// The final path component of the target file.
	FileName,

	/// The full path of the target file, as registered.
	FilePath,
}

impl Token {
	/// Parse a token name as used in rule files: `file-name` or `file-path`.
	pub fn parse(name: &str) -> Result<Self> {
		match name {
			"file-name" => Ok(Token::FileName),
			"file-path" => Ok(Token::FilePath),
			_ => Err(ReplaceError::UnknownToken {
				name: name.to_string(),
			}),
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Token::FileName => "file-name",
			Token::FilePath => "file-path",
		}
	}
}

/// What a matched pattern is replaced with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
	/// Inserted verbatim, with no capture group expansion.
	Literal(String),
	FileName,
	FilePath,
}

impl Replacement {
	/// Resolve the replacement bytes for one target file.
	///
	/// File names and paths are taken verbatim from the OS string.
	pub fn resolve<'a>(&'a self, path: &Path) -> Cow<'a, [u8]> {
		match self {
			Replacement::Literal(text) => Cow::Borrowed(text.as_bytes()),
			Replacement::FileName => path
				.file_name()
				.map(|name| name.as_encoded_bytes().to_vec())
				.unwrap_or_default()
				.into(),
			Replacement::FilePath => path.as_os_str().as_encoded_bytes().to_vec().into(),
		}
	}
}

impl From<Token> for Replacement {
	fn from(token: Token) -> Self {
		match token {
			Token::FileName => Replacement::FileName,
			Token::FilePath => Replacement::FilePath,
		}
	}
}

impl From<&str> for Replacement {
	fn from(text: &str) -> Self {
		Replacement::Literal(text.to_string())
	}
}

impl From<String> for Replacement {
	fn from(text: String) -> Self {
		Replacement::Literal(text)
	}
}

impl fmt::Display for Replacement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Replacement::Literal(text) => write!(f, "{text:?}"),
			Replacement::FileName => write!(f, "<{}>", Token::FileName.as_str()),
			Replacement::FilePath => write!(f, "<{}>", Token::FilePath.as_str()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_tokens() {
		assert_eq!(Token::parse("file-name").unwrap(), Token::FileName);
		assert_eq!(Token::parse("file-path").unwrap(), Token::FilePath);
		match Token::parse("path").unwrap_err() {
			ReplaceError::UnknownToken { name } => assert_eq!(name, "path"),
			_ => panic!("Expected UnknownToken error"),
		}
	}

	#[test]
	fn test_resolve_per_file() {
		let path = Path::new("/srv/docs/report.txt");
		assert_eq!(&*Replacement::FileName.resolve(path), b"report.txt");
		assert_eq!(&*Replacement::FilePath.resolve(path), b"/srv/docs/report.txt");
		assert_eq!(&*Replacement::from("x").resolve(path), b"x");
	}

	#[test]
	fn test_literal_matching_token_text_stays_literal() {
		let literal = Replacement::from("file-name");
		assert_eq!(&*literal.resolve(Path::new("/a/b.txt")), b"file-name");
	}

	#[test]
	fn test_display_names_tokens() {
		assert_eq!(Replacement::FileName.to_string(), "<file-name>");
		assert_eq!(Replacement::FilePath.to_string(), "<file-path>");
		assert_eq!(Replacement::from("x").to_string(), "\"x\"");
	}
}
