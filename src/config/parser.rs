use crate::config::types::RuleFile;
use crate::error::{Result, ReplaceError};
use std::path::Path;

/// Parse a rule file from the given path.
pub fn parse_config_file(path: &Path) -> Result<RuleFile> {
	if !path.exists() {
		return Err(ReplaceError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	let content = std::fs::read_to_string(path).map_err(|source| ReplaceError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a rule file from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<RuleFile> {
	let config: RuleFile =
		toml::from_str(content).map_err(|source| ReplaceError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Validate the parsed rule file
	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::Replacement;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(!config.hidden);
		assert!(config.targets.is_empty());
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
hidden = true
targets = ["src", "README.md"]

[[rules]]
pattern = "text"
replacement = "string"

[[rules]]
pattern = "NAME"
token = "file-name"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.hidden);
		assert_eq!(
			config.targets,
			vec![PathBuf::from("src"), PathBuf::from("README.md")]
		);
		assert_eq!(config.rules.len(), 2);
		assert_eq!(
			config.rules[0].replacement().unwrap(),
			Replacement::from("string")
		);
		assert_eq!(config.rules[1].replacement().unwrap(), Replacement::FileName);
	}

	#[test]
	fn test_parse_rules_inline_tables() {
		let content = r#"
rules = [
    { pattern = "a", replacement = "b" },
    { pattern = "PATH", token = "file-path" },
]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 2);
		assert_eq!(config.rules[1].replacement().unwrap(), Replacement::FilePath);
	}

	#[test]
	fn test_mutually_exclusive_replacement_and_token() {
		let content = r#"
[[rules]]
pattern = "text"
replacement = "string"
token = "file-name"
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_config_str(content, &path);

		match result.unwrap_err() {
			ReplaceError::MutuallyExclusive { option1, option2 } => {
				assert_eq!(option1, "replacement");
				assert_eq!(option2, "token");
			}
			_ => panic!("Expected MutuallyExclusive error"),
		}
	}

	#[test]
	fn test_missing_replacement() {
		let content = r#"
[[rules]]
pattern = "text"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_config_str(content, &path),
			Err(ReplaceError::MissingReplacement { .. })
		));
	}

	#[test]
	fn test_unknown_token() {
		let content = r#"
[[rules]]
pattern = "text"
token = "basename"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_config_str(content, &path),
			Err(ReplaceError::UnknownToken { .. })
		));
	}

	#[test]
	fn test_unknown_field_is_a_parse_error() {
		let content = r#"
[[rules]]
pattern = "text"
replace = "string"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_config_str(content, &path),
			Err(ReplaceError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_parse_missing_file() {
		let result = parse_config_file(Path::new("/nonexistent/.replace-in-files.toml"));
		assert!(matches!(result, Err(ReplaceError::ConfigNotFound { .. })));
	}
}
