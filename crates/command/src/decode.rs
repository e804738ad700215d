//! Response decoding families.
//!
//! Every decoder returns a [`Decoded`] carrying the value plus a `matched`
//! bit. A reply whose shape does not fit the expected family produces the
//! family's typed-empty value with `matched = false`; nothing here ever
//! panics or raises on a mismatch. The caller decides whether the soft
//! failure should surface.

use bytes::Bytes;
use reply::Reply;

/// A decoded value plus a shape indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
	pub value: T,
	pub matched: bool,
}

impl<T> Decoded<T> {
	/// The reply matched the expected shape.
	pub fn clean(value: T) -> Self {
		Self {
			value,
			matched: true,
		}
	}

	/// The reply did not match; `value` is the family's empty result.
	pub fn fallback(value: T) -> Self {
		Self {
			value,
			matched: false,
		}
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
		Decoded {
			value: f(self.value),
			matched: self.matched,
		}
	}
}

/// Host-facing value tree produced by the structural converter.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Bytes(Bytes),
	List(Vec<Payload>),
	/// Associative result: ordered (field, value) pairs.
	Pairs(Vec<(Bytes, Payload)>),
}

impl Payload {
	pub fn is_null(&self) -> bool {
		matches!(self, Payload::Null)
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Payload::Int(i) => Some(*i),
			_ => None,
		}
	}

	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			Payload::Bytes(b) => Some(b),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Payload]> {
		match self {
			Payload::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_pairs(&self) -> Option<&[(Bytes, Payload)]> {
		match self {
			Payload::Pairs(pairs) => Some(pairs),
			_ => None,
		}
	}
}

/// How the structural converter shapes top-level collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shaping {
	/// Keep collections as flat lists.
	Flat,
	/// Interpret a flat array as alternating field/value pairs.
	Associative,
}

/// Integer family: `Int` or `Null`; anything else is zero with a mismatch.
pub fn int_reply(reply: &Reply) -> Decoded<Option<i64>> {
	match reply {
		Reply::Int(i) => Decoded::clean(Some(*i)),
		Reply::Null => Decoded::clean(None),
		_ => Decoded::fallback(Some(0)),
	}
}

/// Boolean family: `Bool`, or `Ok` for commands that signal success through
/// a status reply.
pub fn bool_reply(reply: &Reply) -> Decoded<bool> {
	match reply {
		Reply::Bool(b) => Decoded::clean(*b),
		Reply::Ok => Decoded::clean(true),
		_ => Decoded::fallback(false),
	}
}

/// Double family: `Null`, a native float, or string-encoded decimal text.
pub fn double_reply(reply: &Reply) -> Decoded<Option<f64>> {
	match reply {
		Reply::Null => Decoded::clean(None),
		Reply::Float(d) => Decoded::clean(Some(*d)),
		Reply::Str(s) => Decoded::clean(Some(parse_double(s))),
		_ => Decoded::fallback(None),
	}
}

/// Flat collection family: `Array` or `Set` of scalars; `Null` stays null.
pub fn collection_reply(reply: &Reply) -> Decoded<Option<Vec<Payload>>> {
	match reply {
		Reply::Null => Decoded::clean(None),
		Reply::Array(items) | Reply::Set(items) => Decoded::clean(Some(
			items.iter().map(|r| convert(r, Shaping::Flat)).collect(),
		)),
		_ => Decoded::fallback(Some(Vec::new())),
	}
}

/// Mixed family: no fixed shape, route through the structural converter.
pub fn mixed_reply(reply: &Reply, shaping: Shaping) -> Decoded<Payload> {
	if reply.is_error() {
		return Decoded::fallback(Payload::Null);
	}
	Decoded::clean(convert(reply, shaping))
}

/// Generic structural converter from engine replies to host values.
///
/// `shaping` applies to the top level only; nested collections always come
/// out flat. Set replies collapse to lists, map replies to pairs.
pub fn convert(reply: &Reply, shaping: Shaping) -> Payload {
	match reply {
		Reply::Ok => Payload::Bool(true),
		Reply::Int(i) => Payload::Int(*i),
		Reply::Float(d) => Payload::Float(*d),
		Reply::Bool(b) => Payload::Bool(*b),
		Reply::Str(s) => Payload::Bytes(s.clone()),
		Reply::Null | Reply::Error(_) => Payload::Null,
		Reply::Array(items) => match shaping {
			Shaping::Flat => Payload::List(flat_items(items)),
			Shaping::Associative => associative_items(items),
		},
		Reply::Set(items) => Payload::List(flat_items(items)),
		Reply::Map(pairs) => Payload::Pairs(
			pairs
				.iter()
				.filter_map(|(k, v)| {
					k.as_bytes()
						.map(|field| (field.clone(), convert(v, Shaping::Flat)))
				})
				.collect(),
		),
	}
}

fn flat_items(items: &[Reply]) -> Vec<Payload> {
	items.iter().map(|r| convert(r, Shaping::Flat)).collect()
}

/// Interpret a flat array as alternating field/value pairs.
///
/// Falls back to a flat list when the fields are not byte strings or the
/// pairing is ragged, so malformed data stays visible instead of vanishing.
fn associative_items(items: &[Reply]) -> Payload {
	let pairable = items.len().is_multiple_of(2)
		&& items.iter().step_by(2).all(|field| field.as_bytes().is_some());
	if !pairable {
		return Payload::List(flat_items(items));
	}

	let pairs = items
		.chunks_exact(2)
		.map(|pair| {
			let field = pair[0].as_bytes().cloned().unwrap_or_default();
			(field, convert(&pair[1], Shaping::Flat))
		})
		.collect();
	Payload::Pairs(pairs)
}

/// Lenient decimal parse matching the engine's string-encoded numerics;
/// unparseable text decodes as zero, the way `atof` does.
pub(crate) fn parse_double(bytes: &Bytes) -> f64 {
	std::str::from_utf8(bytes)
		.ok()
		.and_then(|s| s.trim().parse::<f64>().ok())
		.unwrap_or(0.0)
}
