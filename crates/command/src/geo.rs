//! Geo command builders and decoders.

use bytes::Bytes;
use engine::CommandKind;
use reply::Reply;

use crate::args::Arg;
use crate::args::ArgBuffer;
use crate::decode::Decoded;
use crate::decode::parse_double;
use crate::dispatch::Command;
use crate::dispatch::ResponseShape;
use crate::error::EncodeError;

/// Upper bound on the GEOSEARCH argument vector:
/// key + FROMLONLAT pair + BYBOX pair + unit + sort + COUNT n ANY + 3 WITH flags.
pub const MAX_SEARCH_ARGS: usize = 15;

/// Upper bound on the GEOSEARCHSTORE argument vector:
/// two keys + FROMLONLAT pair + BYBOX pair + unit + sort + COUNT n ANY + STOREDIST.
pub const MAX_SEARCH_STORE_ARGS: usize = 16;

/// Distance unit for geo commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoUnit {
	Meters,
	Kilometers,
	Miles,
	Feet,
}

impl GeoUnit {
	pub fn as_str(&self) -> &'static str {
		match self {
			GeoUnit::Meters => "m",
			GeoUnit::Kilometers => "km",
			GeoUnit::Miles => "mi",
			GeoUnit::Feet => "ft",
		}
	}
}

/// Center of a geo search: an existing member or explicit coordinates.
///
/// The two forms are mutually exclusive by construction, so the
/// "both FROM forms given" error class cannot arise.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFrom {
	Member(Bytes),
	LonLat(f64, f64),
}

/// Search area shape: radius or box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoBy {
	Radius(f64),
	Box { width: f64, height: f64 },
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoSort {
	Asc,
	Desc,
}

impl GeoSort {
	fn as_str(&self) -> &'static str {
		match self {
			GeoSort::Asc => "ASC",
			GeoSort::Desc => "DESC",
		}
	}
}

/// Options for GEOSEARCH / GEOSEARCHSTORE.
///
/// WITH-flags only apply to the search variant; STOREDIST only to the store
/// variant. Each builder reads the fields it understands and ignores the
/// rest, mirroring the wire protocol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoSearchOptions {
	pub with_coord: bool,
	pub with_dist: bool,
	pub with_hash: bool,
	pub count: Option<i64>,
	pub any: bool,
	pub sort: Option<GeoSort>,
	pub store_dist: bool,
}

impl GeoSearchOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_coord(mut self) -> Self {
		self.with_coord = true;
		self
	}

	pub fn with_dist(mut self) -> Self {
		self.with_dist = true;
		self
	}

	pub fn with_hash(mut self) -> Self {
		self.with_hash = true;
		self
	}

	pub fn count(mut self, count: i64) -> Self {
		self.count = Some(count);
		self
	}

	pub fn any(mut self) -> Self {
		self.any = true;
		self
	}

	pub fn sort(mut self, sort: GeoSort) -> Self {
		self.sort = Some(sort);
		self
	}

	pub fn store_dist(mut self) -> Self {
		self.store_dist = true;
		self
	}
}

/// The WITH-flag set a search was issued with.
///
/// The wire response omits field names, so this set travels to the decoder
/// as explicit context and drives positional field consumption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WithFlags {
	pub coord: bool,
	pub dist: bool,
	pub hash: bool,
}

impl WithFlags {
	pub fn from_options(opts: &GeoSearchOptions) -> Self {
		Self {
			coord: opts.with_coord,
			dist: opts.with_dist,
			hash: opts.with_hash,
		}
	}

	pub fn any(&self) -> bool {
		self.coord || self.dist || self.hash
	}
}

/// One (longitude, latitude, member) triplet for GEOADD.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoEntry {
	pub longitude: f64,
	pub latitude: f64,
	pub member: Bytes,
}

impl GeoEntry {
	pub fn new(longitude: f64, latitude: f64, member: impl Into<Bytes>) -> Self {
		Self {
			longitude,
			latitude,
			member: member.into(),
		}
	}
}

/// One decoded GEOSEARCH result with its requested extras.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
	pub member: Bytes,
	pub dist: Option<f64>,
	pub hash: Option<i64>,
	pub coord: Option<(f64, f64)>,
}

/// GEOSEARCH result: a plain member list when no WITH-flags were requested,
/// otherwise one [`GeoMatch`] per member.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoSearchReply {
	Members(Vec<Bytes>),
	Matches(Vec<GeoMatch>),
}

/// GEOADD key lon lat member [lon lat member ...]
pub fn geoadd(key: Bytes, entries: Vec<GeoEntry>) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}
	if entries.is_empty() {
		return Err(EncodeError::Arity("geoadd"));
	}

	let mut args = ArgBuffer::with_capacity(1 + entries.len() * 3);
	args.push(key);
	for entry in entries {
		args.push_double(entry.longitude);
		args.push_double(entry.latitude);
		args.push(entry.member);
	}
	Ok(Command::new(CommandKind::GeoAdd, ResponseShape::Int, args))
}

/// GEODIST key src dst [unit]
pub fn geodist(
	key: Bytes,
	src: Bytes,
	dst: Bytes,
	unit: Option<GeoUnit>,
) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}
	if src.is_empty() || dst.is_empty() {
		return Err(EncodeError::Missing("member"));
	}

	let mut args = ArgBuffer::with_capacity(if unit.is_some() { 4 } else { 3 });
	args.push(key);
	args.push(src);
	args.push(dst);
	if let Some(unit) = unit {
		args.push_literal(unit.as_str());
	}
	Ok(Command::new(CommandKind::GeoDist, ResponseShape::Double, args))
}

/// GEOHASH key member [member ...]
pub fn geohash(key: Bytes, members: Vec<Arg>) -> Result<Command, EncodeError> {
	key_members(CommandKind::GeoHash, ResponseShape::GeoHash, "geohash", key, members)
}

/// GEOPOS key member [member ...]
pub fn geopos(key: Bytes, members: Vec<Arg>) -> Result<Command, EncodeError> {
	key_members(CommandKind::GeoPos, ResponseShape::GeoPos, "geopos", key, members)
}

fn key_members(
	kind: CommandKind,
	shape: ResponseShape,
	name: &'static str,
	key: Bytes,
	members: Vec<Arg>,
) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}
	if members.is_empty() {
		return Err(EncodeError::Arity(name));
	}

	let mut args = ArgBuffer::with_capacity(1 + members.len());
	args.push(key);
	for member in members {
		args.push_arg(member);
	}
	Ok(Command::new(kind, shape, args))
}

/// GEOSEARCH key FROM... BY... unit [sort] [COUNT n [ANY]] [WITH...]
pub fn geosearch(
	key: Bytes,
	from: GeoFrom,
	by: GeoBy,
	unit: GeoUnit,
	opts: &GeoSearchOptions,
) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}

	let flags = WithFlags::from_options(opts);
	let mut args = ArgBuffer::with_capacity(MAX_SEARCH_ARGS);
	args.push(key);
	push_search_core(&mut args, &from, by, unit, opts)?;

	if flags.coord {
		args.push_literal("WITHCOORD");
	}
	if flags.dist {
		args.push_literal("WITHDIST");
	}
	if flags.hash {
		args.push_literal("WITHHASH");
	}

	Ok(Command::new(
		CommandKind::GeoSearch,
		ResponseShape::GeoSearch { flags },
		args,
	))
}

/// GEOSEARCHSTORE dest src FROM... BY... unit [sort] [COUNT n [ANY]] [STOREDIST]
pub fn geosearchstore(
	dest: Bytes,
	src: Bytes,
	from: GeoFrom,
	by: GeoBy,
	unit: GeoUnit,
	opts: &GeoSearchOptions,
) -> Result<Command, EncodeError> {
	if dest.is_empty() || src.is_empty() {
		return Err(EncodeError::Missing("key"));
	}

	let mut args = ArgBuffer::with_capacity(MAX_SEARCH_STORE_ARGS);
	args.push(dest);
	args.push(src);
	push_search_core(&mut args, &from, by, unit, opts)?;

	if opts.store_dist {
		args.push_literal("STOREDIST");
	}

	Ok(Command::new(CommandKind::GeoSearchStore, ResponseShape::Int, args))
}

/// Shared FROM / BY / unit / sort / COUNT token sequence.
fn push_search_core(
	args: &mut ArgBuffer,
	from: &GeoFrom,
	by: GeoBy,
	unit: GeoUnit,
	opts: &GeoSearchOptions,
) -> Result<(), EncodeError> {
	match from {
		GeoFrom::Member(member) => {
			if member.is_empty() {
				return Err(EncodeError::Missing("member"));
			}
			args.push_literal("FROMMEMBER");
			args.push(member.clone());
		}
		GeoFrom::LonLat(lon, lat) => {
			args.push_literal("FROMLONLAT");
			args.push_double(*lon);
			args.push_double(*lat);
		}
	}

	match by {
		GeoBy::Radius(radius) => {
			args.push_literal("BYRADIUS");
			args.push_double(radius);
		}
		GeoBy::Box { width, height } => {
			args.push_literal("BYBOX");
			args.push_double(width);
			args.push_double(height);
		}
	}

	args.push_literal(unit.as_str());

	if let Some(sort) = opts.sort {
		args.push_literal(sort.as_str());
	}

	if let Some(count) = opts.count {
		if count <= 0 {
			return Err(EncodeError::InvalidOption("geosearch", "COUNT must be positive"));
		}
		args.push_literal("COUNT");
		args.push_int(count);
		if opts.any {
			args.push_literal("ANY");
		}
	}

	Ok(())
}

/// GEOHASH decoding: one null-or-string entry per requested member.
pub fn geo_hash_reply(reply: &Reply) -> Decoded<Vec<Option<Bytes>>> {
	let Some(items) = reply.as_items() else {
		return Decoded::fallback(Vec::new());
	};

	let hashes = items
		.iter()
		.filter_map(|item| match item {
			Reply::Str(s) => Some(Some(s.clone())),
			Reply::Null => Some(None),
			_ => None,
		})
		.collect();
	Decoded::clean(hashes)
}

/// GEOPOS decoding: one null-or-[lon, lat] entry per requested member.
pub fn geo_pos_reply(reply: &Reply) -> Decoded<Vec<Option<(f64, f64)>>> {
	let Some(items) = reply.as_items() else {
		return Decoded::fallback(Vec::new());
	};

	let positions = items
		.iter()
		.filter_map(|item| match item {
			Reply::Array(pair) if pair.len() == 2 => {
				match (coordinate(&pair[0]), coordinate(&pair[1])) {
					(Some(lon), Some(lat)) => Some(Some((lon, lat))),
					_ => None,
				}
			}
			Reply::Null => Some(None),
			_ => None,
		})
		.collect();
	Decoded::clean(positions)
}

/// GEOSEARCH decoding.
///
/// Without WITH-flags the reply is a flat member list. With flags, each
/// element is `[member, [extras...]]` where the extras carry no field names;
/// they are consumed positionally in the fixed distance, hash, coordinates
/// order, taking only the fields the request asked for.
pub fn geo_search_reply(reply: &Reply, flags: WithFlags) -> Decoded<GeoSearchReply> {
	if !flags.any() {
		let Some(items) = reply.as_items() else {
			return Decoded::fallback(GeoSearchReply::Members(Vec::new()));
		};
		let members = items
			.iter()
			.filter_map(|item| item.as_bytes().cloned())
			.collect();
		return Decoded::clean(GeoSearchReply::Members(members));
	}

	let Some(items) = reply.as_items() else {
		return Decoded::fallback(GeoSearchReply::Matches(Vec::new()));
	};

	let matches = items
		.iter()
		.filter_map(|item| decode_match(item, flags))
		.collect();
	Decoded::clean(GeoSearchReply::Matches(matches))
}

fn decode_match(item: &Reply, flags: WithFlags) -> Option<GeoMatch> {
	let parts = item.as_array()?;
	let member = parts.first()?.as_bytes()?.clone();
	let extras = parts.get(1)?.as_array()?;

	let mut idx = 0;
	let mut result = GeoMatch {
		member,
		dist: None,
		hash: None,
		coord: None,
	};

	if flags.dist && idx < extras.len() {
		result.dist = match &extras[idx] {
			Reply::Str(s) => Some(parse_double(s)),
			Reply::Float(d) => Some(*d),
			_ => None,
		};
		idx += 1;
	}

	if flags.hash && idx < extras.len() {
		result.hash = extras[idx].as_int();
		idx += 1;
	}

	if flags.coord && idx < extras.len() {
		result.coord = match &extras[idx] {
			Reply::Array(pair) if pair.len() == 2 => {
				match (coordinate(&pair[0]), coordinate(&pair[1])) {
					(Some(lon), Some(lat)) => Some((lon, lat)),
					_ => None,
				}
			}
			_ => None,
		};
	}

	Some(result)
}

/// A coordinate arrives either string-encoded or as a native float.
fn coordinate(reply: &Reply) -> Option<f64> {
	match reply {
		Reply::Str(s) => Some(parse_double(s)),
		Reply::Float(d) => Some(*d),
		_ => None,
	}
}
