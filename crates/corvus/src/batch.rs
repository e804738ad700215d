//! Pipeline/transaction composition.
//!
//! While a batch is being composed, every command entry point enqueues
//! instead of executing and hands back the batch itself for chaining. Each
//! buffered entry captures its argument vector and decode context at enqueue
//! time, so [`crate::Client::exec`] only has to walk them FIFO.

use bytes::Bytes;
use command::Arg;
use command::BatchBuffer;
use command::Command;
use command::geo;
use command::geo::GeoBy;
use command::geo::GeoEntry;
use command::geo::GeoFrom;
use command::geo::GeoSearchOptions;
use command::geo::GeoUnit;
use command::scan;
use command::scan::ScanOptions;
use command::set;
use engine::CommandKind;

use crate::error::ClientError;

/// A chainable buffer of pending commands.
///
/// ```no_run
/// # fn demo<E: corvus::Engine>(client: &mut corvus::Client<E>) -> Result<(), corvus::ClientError> {
/// let mut batch = client.batch();
/// batch.sadd("s", ["a", "b"])?.scard("s")?;
/// let results = client.exec(batch)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Batch {
	buffer: BatchBuffer,
}

impl Batch {
	pub fn new() -> Self {
		Self {
			buffer: BatchBuffer::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	pub(crate) fn into_entries(self) -> Vec<Command> {
		self.buffer.into_entries()
	}

	fn push(&mut self, command: Command) -> &mut Self {
		self.buffer.enqueue(command);
		self
	}

	// --- set commands ---

	pub fn sadd(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sadd(key.into(), collect_args(members))?))
	}

	pub fn srem(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::srem(key.into(), collect_args(members))?))
	}

	pub fn sismember(
		&mut self,
		key: impl Into<Bytes>,
		member: impl Into<Bytes>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sismember(key.into(), member.into())?))
	}

	pub fn smismember(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::smismember(key.into(), collect_args(members))?))
	}

	pub fn smembers(&mut self, key: impl Into<Bytes>) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::smembers(key.into())?))
	}

	pub fn scard(&mut self, key: impl Into<Bytes>) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::scard(key.into())?))
	}

	pub fn spop(
		&mut self,
		key: impl Into<Bytes>,
		count: Option<i64>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::spop(key.into(), count)?))
	}

	pub fn srandmember(
		&mut self,
		key: impl Into<Bytes>,
		count: Option<i64>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::srandmember(key.into(), count)?))
	}

	pub fn smove(
		&mut self,
		src: impl Into<Bytes>,
		dst: impl Into<Bytes>,
		member: impl Into<Bytes>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::smove(src.into(), dst.into(), member.into())?))
	}

	pub fn sinter(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sinter(collect_keys(keys))?))
	}

	pub fn sunion(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sunion(collect_keys(keys))?))
	}

	pub fn sdiff(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sdiff(collect_keys(keys))?))
	}

	pub fn sintercard(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
		limit: Option<i64>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sintercard(collect_keys(keys), limit)?))
	}

	pub fn sinterstore(
		&mut self,
		dst: impl Into<Bytes>,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sinterstore(dst.into(), collect_keys(keys))?))
	}

	pub fn sunionstore(
		&mut self,
		dst: impl Into<Bytes>,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sunionstore(dst.into(), collect_keys(keys))?))
	}

	pub fn sdiffstore(
		&mut self,
		dst: impl Into<Bytes>,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(set::sdiffstore(dst.into(), collect_keys(keys))?))
	}

	// --- incremental iteration ---
	//
	// Batched scans take a raw cursor token: no cursor object is in scope
	// when the buffer eventually runs, so each step decodes to the raw
	// two-element page (next cursor, batch).

	pub fn scan(
		&mut self,
		cursor_token: &str,
		opts: &ScanOptions,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(scan::scan(cursor_token, opts)?))
	}

	pub fn sscan(
		&mut self,
		key: impl Into<Bytes>,
		cursor_token: &str,
		opts: &ScanOptions,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(scan::sub_scan(CommandKind::SScan, key.into(), cursor_token, opts)?))
	}

	pub fn hscan(
		&mut self,
		key: impl Into<Bytes>,
		cursor_token: &str,
		opts: &ScanOptions,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(scan::sub_scan(CommandKind::HScan, key.into(), cursor_token, opts)?))
	}

	pub fn zscan(
		&mut self,
		key: impl Into<Bytes>,
		cursor_token: &str,
		opts: &ScanOptions,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(scan::sub_scan(CommandKind::ZScan, key.into(), cursor_token, opts)?))
	}

	// --- geo commands ---

	pub fn geoadd(
		&mut self,
		key: impl Into<Bytes>,
		entries: impl IntoIterator<Item = GeoEntry>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(geo::geoadd(key.into(), entries.into_iter().collect())?))
	}

	pub fn geodist(
		&mut self,
		key: impl Into<Bytes>,
		src: impl Into<Bytes>,
		dst: impl Into<Bytes>,
		unit: Option<GeoUnit>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(geo::geodist(key.into(), src.into(), dst.into(), unit)?))
	}

	pub fn geohash(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(geo::geohash(key.into(), collect_args(members))?))
	}

	pub fn geopos(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(geo::geopos(key.into(), collect_args(members))?))
	}

	/// Enqueue a GEOSEARCH; the requested WITH-flag set is captured with the
	/// entry and drives decoding when the batch runs.
	pub fn geosearch(
		&mut self,
		key: impl Into<Bytes>,
		from: GeoFrom,
		by: GeoBy,
		unit: GeoUnit,
		opts: &GeoSearchOptions,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(geo::geosearch(key.into(), from, by, unit, opts)?))
	}

	pub fn geosearchstore(
		&mut self,
		dest: impl Into<Bytes>,
		src: impl Into<Bytes>,
		from: GeoFrom,
		by: GeoBy,
		unit: GeoUnit,
		opts: &GeoSearchOptions,
	) -> Result<&mut Self, ClientError> {
		Ok(self.push(geo::geosearchstore(dest.into(), src.into(), from, by, unit, opts)?))
	}
}

fn collect_args(items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<Arg> {
	items.into_iter().map(Into::into).collect()
}

fn collect_keys(keys: impl IntoIterator<Item = impl Into<Bytes>>) -> Vec<Bytes> {
	keys.into_iter().map(Into::into).collect()
}
