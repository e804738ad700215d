use command::EncodeError;
use engine::EngineError;
use thiserror::Error;

/// Caller-visible failure signal.
///
/// Always distinct from legitimate empty results: those travel inside `Ok`
/// values. Decode mismatches are not errors at all; they soften to typed
/// empties (see the command crate's decode module).
#[derive(Debug, Error)]
pub enum ClientError {
	/// Argument marshaling failed; the engine was never called.
	#[error(transparent)]
	Encode(#[from] EncodeError),

	/// The engine reported a failure, propagated verbatim.
	#[error(transparent)]
	Engine(#[from] EngineError),
}
