use crate::config::parser::parse_config_file;
use crate::config::types::LoadedRuleFile;
use crate::engine::ReplacementEngine;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// File name looked up when no rule file is given explicitly.
pub const RULE_FILE_NAME: &str = ".replace-in-files.toml";

/// Find the nearest rule file, starting at `start_dir` and walking up.
pub fn discover_rule_file(start_dir: &Path) -> Option<PathBuf> {
	start_dir
		.ancestors()
		.map(|dir| dir.join(RULE_FILE_NAME))
		.find(|candidate| candidate.is_file())
}

/// Parse a rule file and remember where it came from.
pub fn load_rule_file(path: &Path) -> Result<LoadedRuleFile> {
	let config = parse_config_file(path)?;
	Ok(LoadedRuleFile {
		config,
		path: path.to_path_buf(),
	})
}

impl LoadedRuleFile {
	/// Directory that relative targets are resolved against.
	pub fn base_dir(&self) -> &Path {
		self.path.parent().unwrap_or_else(|| Path::new("."))
	}

	/// Register this file's hidden policy, rules and targets on `engine`.
	///
	/// The hidden policy is set first so directory targets are expanded under it.
	pub fn apply_to(&self, engine: &mut ReplacementEngine) -> Result<()> {
		engine.set_allow_hidden(self.config.hidden);

		for rule in &self.config.rules {
			engine.add_replacement(&rule.pattern, rule.replacement()?)?;
		}

		for target in &self.config.targets {
			engine.add_target(self.base_dir().join(target))?;
		}

		Ok(())
	}
}

/// Template written by `--init`.
pub fn generate_init_template() -> String {
	format!(
		r#"# {RULE_FILE_NAME}
# Rules run top to bottom; each rule sees the previous rule's output.

# Include hidden files and directories when scanning targets.
hidden = false

# Files or directories to rewrite, relative to this file.
targets = ["src"]

[[rules]]
pattern = "Copyright \\(c\\) \\d{{4}}"
replacement = "Copyright (c) 2026"

# Per-file tokens: "file-name" or "file-path".
# [[rules]]
# pattern = "@FILE@"
# token = "file-name"
"#
	)
}
