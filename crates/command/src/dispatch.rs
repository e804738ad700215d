//! Command envelope and response-shape dispatch.
//!
//! `ResponseShape` is the closed {category × shape} set: each variant names
//! a decode family and carries whatever context that family needs (the
//! WITH-flag set of a pending geo search, the shaping of a pending scan).
//! [`decode_shaped`] is the single dispatch point mapping a shape to its
//! decoder, used by the synchronous path and by batch execution alike.

use engine::CommandKind;
use reply::Reply;

use crate::args::ArgBuffer;
use crate::decode;
use crate::decode::Decoded;
use crate::decode::Payload;
use crate::decode::Shaping;
use crate::geo;
use crate::geo::GeoSearchReply;
use crate::geo::WithFlags;
use crate::scan;

/// A fully built command: wire arguments plus captured decode context.
///
/// Self-sufficient by construction; executing it later needs nothing beyond
/// what is stored here.
#[derive(Debug, Clone)]
pub struct Command {
	pub kind: CommandKind,
	pub shape: ResponseShape,
	pub args: ArgBuffer,
}

impl Command {
	pub fn new(kind: CommandKind, shape: ResponseShape, args: ArgBuffer) -> Self {
		Self { kind, shape, args }
	}
}

/// Expected response shape, with per-command decode context.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
	Int,
	Bool,
	Double,
	Collection,
	Mixed,
	GeoHash,
	GeoPos,
	GeoSearch { flags: WithFlags },
	Scan { shaping: Shaping },
}

/// Decode a reply according to its command's captured shape.
pub fn decode_shaped(shape: &ResponseShape, reply: &Reply) -> Decoded<Payload> {
	match shape {
		ResponseShape::Int => decode::int_reply(reply)
			.map(|v| v.map(Payload::Int).unwrap_or(Payload::Null)),
		ResponseShape::Bool => decode::bool_reply(reply).map(Payload::Bool),
		ResponseShape::Double => decode::double_reply(reply)
			.map(|v| v.map(Payload::Float).unwrap_or(Payload::Null)),
		ResponseShape::Collection => decode::collection_reply(reply)
			.map(|v| v.map(Payload::List).unwrap_or(Payload::Null)),
		ResponseShape::Mixed => decode::mixed_reply(reply, Shaping::Flat),
		ResponseShape::GeoHash => geo::geo_hash_reply(reply).map(|hashes| {
			Payload::List(
				hashes
					.into_iter()
					.map(|h| h.map(Payload::Bytes).unwrap_or(Payload::Null))
					.collect(),
			)
		}),
		ResponseShape::GeoPos => geo::geo_pos_reply(reply).map(|positions| {
			Payload::List(
				positions
					.into_iter()
					.map(|p| match p {
						Some((lon, lat)) => {
							Payload::List(vec![Payload::Float(lon), Payload::Float(lat)])
						}
						None => Payload::Null,
					})
					.collect(),
			)
		}),
		ResponseShape::GeoSearch { flags } => {
			let flags = *flags;
			geo::geo_search_reply(reply, flags).map(|result| geo_search_payload(result, flags))
		}
		ResponseShape::Scan { shaping } => scan::scan_page(reply, *shaping).map(|page| {
			Payload::List(vec![
				Payload::Bytes(bytes::Bytes::from(page.next_cursor)),
				page.items,
			])
		}),
	}
}

/// Flatten a geo search result the way the caller-facing API shapes it:
/// a plain list of names, or member-keyed pairs whose extras keep the
/// requested-flag order (distance, hash, coordinates).
fn geo_search_payload(result: GeoSearchReply, flags: WithFlags) -> Payload {
	match result {
		GeoSearchReply::Members(members) => {
			Payload::List(members.into_iter().map(Payload::Bytes).collect())
		}
		GeoSearchReply::Matches(matches) => Payload::Pairs(
			matches
				.into_iter()
				.map(|m| {
					let mut extras = Vec::new();
					if flags.dist && let Some(dist) = m.dist {
						extras.push(Payload::Float(dist));
					}
					if flags.hash && let Some(hash) = m.hash {
						extras.push(Payload::Int(hash));
					}
					if flags.coord && let Some((lon, lat)) = m.coord {
						extras.push(Payload::List(vec![
							Payload::Float(lon),
							Payload::Float(lat),
						]));
					}
					(m.member, Payload::List(extras))
				})
				.collect(),
		),
	}
}
