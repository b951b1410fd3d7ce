use crate::diagnostics::event::Diagnostic;
use std::sync::Mutex;

/// Receiver for diagnostic events.
///
/// Implementations decide how events are rendered; the core only reports them.
pub trait DiagnosticSink: Send + Sync {
	fn report(&self, event: &Diagnostic);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn report(&self, event: &Diagnostic) {
		match event {
			Diagnostic::ReadFailed { .. }
			| Diagnostic::WriteFailed { .. }
			| Diagnostic::ScanFailed { .. }
			| Diagnostic::TargetNotFound { .. } => tracing::warn!(code = event.code(), "{event}"),
			Diagnostic::FileReplaced { .. } => tracing::info!(code = event.code(), "{event}"),
			_ => tracing::debug!(code = event.code(), "{event}"),
		}
	}
}

/// Collects events in memory, in report order.
#[derive(Debug, Default)]
pub struct MemorySink {
	events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of all events reported so far.
	pub fn events(&self) -> Vec<Diagnostic> {
		match self.events.lock() {
			Ok(events) => events.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	/// Codes of all events reported so far.
	pub fn codes(&self) -> Vec<u32> {
		self.events().iter().map(Diagnostic::code).collect()
	}
}

impl DiagnosticSink for MemorySink {
	fn report(&self, event: &Diagnostic) {
		match self.events.lock() {
			Ok(mut events) => events.push(event.clone()),
			Err(poisoned) => poisoned.into_inner().push(event.clone()),
		}
	}
}
