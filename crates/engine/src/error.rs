use thiserror::Error;

/// Failure reported by the execution engine.
///
/// `Command` carries a server-reported message verbatim; `Fault` covers
/// transport and core-level failures, including timeouts enforced below this
/// layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
	/// Error reply from the server, propagated verbatim.
	#[error("{0}")]
	Command(String),

	/// Transport or core failure.
	#[error("engine failure: {0}")]
	Fault(String),
}
