//! Rule file loading for replace-in-files.
//!
//! This module handles:
//! - TOML rule file parsing and validation
//! - Discovery of the nearest rule file
//! - Registering a rule file's contents on an engine

pub mod discovery;
pub mod parser;
pub mod types;

pub use discovery::{
	RULE_FILE_NAME, discover_rule_file, generate_init_template, load_rule_file,
};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{LoadedRuleFile, RuleEntry, RuleFile};
