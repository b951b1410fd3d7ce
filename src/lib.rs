//! replace-in-files - rule-based regex substitution across files and directory trees.
//!
//! This library provides the core functionality for replace-in-files, including:
//! - Recursive target discovery with a hidden-entry policy
//! - Ordered, pattern-keyed substitution rules with per-file tokens
//! - In-place rewriting with per-file failure isolation
//! - Structured diagnostic events
//! - TOML rule files
//!
//! # Example
//!
//! ```no_run
//! use replace_in_files::ReplacementEngine;
//! use replace_in_files::rules::Token;
//!
//! let mut engine = ReplacementEngine::new();
//! engine
//!     .add_target("docs")?
//!     .add_rule(r"\bcolour\b", "color")?
//!     .add_token_rule("@FILE@", Token::FileName)?;
//!
//! let summary = engine.apply();
//! for (path, error) in &summary.failed {
//!     eprintln!("{}: {error}", path.display());
//! }
//! # Ok::<(), replace_in_files::ReplaceError>(())
//! ```

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod files;
pub mod rules;

pub use engine::{ApplySummary, ReplacementEngine};
pub use error::{ReplaceError, Result};
