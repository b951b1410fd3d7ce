//! Substitution rules for replace-in-files.
//!
//! This module handles:
//! - Literal and per-file token replacements
//! - Compiled rules and their ordered, pattern-keyed collection
//! - Parsing sed-like rule expressions from the command line

pub mod expression;
pub mod replacement;
pub mod rule_set;

pub use expression::Expression;
pub use replacement::{Replacement, Token};
pub use rule_set::{Rule, RuleSet};
