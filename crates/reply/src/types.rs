//! Response value representation.

use bytes::Bytes;

/// A decoded response produced by the execution engine.
///
/// Collection variants keep their server-side ordering; `Map` is an ordered
/// sequence of pairs rather than a hash table so decoders can consume fields
/// positionally.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
	/// Status reply signalling plain success (`OK`).
	Ok,

	/// Signed 64-bit integer.
	Int(i64),

	/// Double-precision float.
	Float(f64),

	/// Boolean.
	Bool(bool),

	/// Binary-safe byte string.
	Str(Bytes),

	/// Ordered sequence of nested replies.
	Array(Vec<Reply>),

	/// Set reply; ordering is whatever the engine delivered.
	Set(Vec<Reply>),

	/// Map reply as an ordered pair sequence.
	Map(Vec<(Reply, Reply)>),

	/// Absent value.
	Null,

	/// Server-reported error carried inside a response payload.
	Error(Bytes),
}

impl Reply {
	/// Check if the value is an error
	pub fn is_error(&self) -> bool {
		matches!(self, Reply::Error(_))
	}

	/// Check if the value is null
	pub fn is_null(&self) -> bool {
		matches!(self, Reply::Null)
	}

	/// Try to convert to a string slice
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Reply::Str(s) => std::str::from_utf8(s).ok(),
			_ => None,
		}
	}

	/// Try to convert to bytes
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Reply::Str(b) => Some(b),
			_ => None,
		}
	}

	/// Try to convert to integer
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Reply::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Try to convert to boolean
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Reply::Bool(b) => Some(*b),
			_ => None,
		}
	}

	/// Try to convert to double
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Reply::Float(d) => Some(*d),
			_ => None,
		}
	}

	/// Try to convert to an array of nested replies
	pub fn as_array(&self) -> Option<&[Reply]> {
		match self {
			Reply::Array(a) => Some(a),
			_ => None,
		}
	}

	/// Ordered items of an `Array` or `Set` reply
	pub fn as_items(&self) -> Option<&[Reply]> {
		match self {
			Reply::Array(a) | Reply::Set(a) => Some(a),
			_ => None,
		}
	}

	/// Try to convert to map pairs
	pub fn as_pairs(&self) -> Option<&[(Reply, Reply)]> {
		match self {
			Reply::Map(m) => Some(m),
			_ => None,
		}
	}

	/// Convert to String with lossy UTF-8 conversion
	pub fn to_string_lossy(&self) -> Option<String> {
		match self {
			Reply::Str(s) => Some(String::from_utf8_lossy(s).into_owned()),
			_ => None,
		}
	}

	// Convenience constructors

	/// Create a byte-string value
	pub fn str(s: impl Into<Bytes>) -> Self {
		Reply::Str(s.into())
	}

	/// Create an error value
	pub fn error(e: impl Into<Bytes>) -> Self {
		Reply::Error(e.into())
	}

	/// Create an integer value
	pub fn integer(i: i64) -> Self {
		Reply::Int(i)
	}

	/// Create an array value from an iterator
	pub fn array(items: impl IntoIterator<Item = Reply>) -> Self {
		Reply::Array(items.into_iter().collect())
	}

	/// Create a null value
	pub fn null() -> Self {
		Reply::Null
	}
}

// Convenient From implementations
impl From<&str> for Reply {
	fn from(s: &str) -> Self {
		Reply::Str(Bytes::from(s.to_string()))
	}
}

impl From<String> for Reply {
	fn from(s: String) -> Self {
		Reply::Str(Bytes::from(s))
	}
}

impl From<&[u8]> for Reply {
	fn from(b: &[u8]) -> Self {
		Reply::Str(Bytes::copy_from_slice(b))
	}
}

impl From<i64> for Reply {
	fn from(i: i64) -> Self {
		Reply::Int(i)
	}
}

impl From<bool> for Reply {
	fn from(b: bool) -> Self {
		Reply::Bool(b)
	}
}

impl From<f64> for Reply {
	fn from(d: f64) -> Self {
		Reply::Float(d)
	}
}

impl From<Bytes> for Reply {
	fn from(b: Bytes) -> Self {
		Reply::Str(b)
	}
}

impl<T: Into<Reply>> From<Vec<T>> for Reply {
	fn from(v: Vec<T>) -> Self {
		Reply::Array(v.into_iter().map(|x| x.into()).collect())
	}
}

impl<T: Into<Reply>> From<Option<T>> for Reply {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => Reply::Null,
		}
	}
}
