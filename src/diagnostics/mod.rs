//! Diagnostic events for replace-in-files.
//!
//! This module handles:
//! - Structured events with stable numeric codes
//! - The sink trait the engine and file access report through
//! - A `tracing` backed sink and an in-memory sink

pub mod event;
pub mod sink;

pub use event::Diagnostic;
pub use sink::{DiagnosticSink, MemorySink, TracingSink};
