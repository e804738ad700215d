//! The wire argument vector.

use bytes::Bytes;

/// A caller-supplied scalar destined for the argument vector.
///
/// Non-string values are converted to their canonical decimal text form when
/// pushed; the buffer owns whatever it derives.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
	Bytes(Bytes),
	Int(i64),
	Double(f64),
}

impl Arg {
	/// Canonical byte-string form of the argument.
	pub fn into_bytes(self) -> Bytes {
		match self {
			Arg::Bytes(b) => b,
			Arg::Int(i) => Bytes::from(format_int(i)),
			Arg::Double(d) => Bytes::from(format_double(d)),
		}
	}
}

impl From<&str> for Arg {
	fn from(s: &str) -> Self {
		Arg::Bytes(Bytes::from(s.to_string()))
	}
}

impl From<String> for Arg {
	fn from(s: String) -> Self {
		Arg::Bytes(Bytes::from(s))
	}
}

impl From<Bytes> for Arg {
	fn from(b: Bytes) -> Self {
		Arg::Bytes(b)
	}
}

impl From<&[u8]> for Arg {
	fn from(b: &[u8]) -> Self {
		Arg::Bytes(Bytes::copy_from_slice(b))
	}
}

impl From<i64> for Arg {
	fn from(i: i64) -> Self {
		Arg::Int(i)
	}
}

impl From<f64> for Arg {
	fn from(d: f64) -> Self {
		Arg::Double(d)
	}
}

/// Ordered byte-string arguments for one command.
///
/// Entries enter three ways: caller data as cheap `Bytes` handles, protocol
/// keywords as static literals, and derived numeric text as owned
/// allocations. Every entry is released exactly once when the buffer drops,
/// whether or not the command ever ran.
#[derive(Debug, Clone, Default)]
pub struct ArgBuffer {
	args: Vec<Bytes>,
}

impl ArgBuffer {
	pub fn new() -> Self {
		Self { args: Vec::new() }
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			args: Vec::with_capacity(capacity),
		}
	}

	/// Append caller-supplied bytes.
	pub fn push(&mut self, arg: impl Into<Bytes>) {
		self.args.push(arg.into());
	}

	/// Append a literal protocol keyword without allocating.
	pub fn push_literal(&mut self, token: &'static str) {
		self.args.push(Bytes::from_static(token.as_bytes()));
	}

	/// Append a scalar, converting numerics to canonical text.
	pub fn push_arg(&mut self, arg: impl Into<Arg>) {
		self.args.push(arg.into().into_bytes());
	}

	/// Append an integer in decimal text form.
	pub fn push_int(&mut self, value: i64) {
		self.args.push(Bytes::from(format_int(value)));
	}

	/// Append a double in canonical text form.
	pub fn push_double(&mut self, value: f64) {
		self.args.push(Bytes::from(format_double(value)));
	}

	pub fn len(&self) -> usize {
		self.args.len()
	}

	pub fn is_empty(&self) -> bool {
		self.args.is_empty()
	}

	pub fn as_slice(&self) -> &[Bytes] {
		&self.args
	}

	pub fn into_vec(self) -> Vec<Bytes> {
		self.args
	}
}

/// Decimal text form of an integer.
pub fn format_int(value: i64) -> String {
	value.to_string()
}

/// Canonical text form of a double.
///
/// `f64`'s `Display` prints the shortest decimal string that parses back to
/// the same bits and never switches to exponent notation, which is exactly
/// what the wire protocol expects for numeric arguments.
pub fn format_double(value: f64) -> String {
	value.to_string()
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(0)]
	#[case(42)]
	#[case(-7)]
	#[case(i64::MAX)]
	#[case(i64::MIN)]
	fn test_int_round_trip(#[case] value: i64) {
		let text = format_int(value);
		assert_eq!(text.parse::<i64>().unwrap(), value);
	}

	#[rstest]
	#[case(13.361389)]
	#[case(38.115556)]
	#[case(-122.27652)]
	#[case(0.0)]
	#[case(200.5)]
	#[case(1e-9)]
	fn test_double_round_trip(#[case] value: f64) {
		let text = format_double(value);
		assert_eq!(text.parse::<f64>().unwrap(), value);
		assert!(!text.contains('e') && !text.contains('E'), "{text}");
	}

	#[test]
	fn test_double_is_plain_decimal() {
		assert_eq!(format_double(13.361389), "13.361389");
		assert_eq!(format_double(-0.5), "-0.5");
	}

	#[test]
	fn test_arg_conversion() {
		assert_eq!(Arg::from(5i64).into_bytes(), Bytes::from_static(b"5"));
		assert_eq!(Arg::from(1.5f64).into_bytes(), Bytes::from_static(b"1.5"));
		assert_eq!(Arg::from("m").into_bytes(), Bytes::from_static(b"m"));
	}

	#[test]
	fn test_buffer_push_forms() {
		let mut buf = ArgBuffer::with_capacity(4);
		buf.push(Bytes::from_static(b"key"));
		buf.push_literal("WITHCOORD");
		buf.push_int(3);
		buf.push_double(2.5);

		let args = buf.into_vec();
		assert_eq!(args.len(), 4);
		assert_eq!(&args[1][..], b"WITHCOORD");
		assert_eq!(&args[2][..], b"3");
		assert_eq!(&args[3][..], b"2.5");
	}
}
