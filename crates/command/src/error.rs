use thiserror::Error;

/// Errors raised while building an argument vector.
///
/// A failed build aborts before any engine interaction and leaves no partial
/// state behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
	/// A required field is empty or absent.
	#[error("missing required argument: {0}")]
	Missing(&'static str),

	/// Wrong number of arguments for the command.
	#[error("wrong number of arguments for '{0}'")]
	Arity(&'static str),

	/// An option that the command does not accept.
	#[error("invalid option for '{0}': {1}")]
	InvalidOption(&'static str, &'static str),
}
