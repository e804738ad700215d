//! The caller-facing command surface.
//!
//! Every method follows the same path: build the argument vector, hand it
//! to the engine, decode the typed response. Decode mismatches soften to the
//! family's empty value with a warning; real failures surface as
//! [`ClientError`]. All methods take `&mut self`, since a client wraps
//! exclusive access to a single engine handle.

use bytes::Bytes;
use command::Arg;
use command::Command;
use command::ResponseShape;
use command::decode;
use command::decode::Decoded;
use command::decode::Payload;
use command::decode::Shaping;
use command::geo;
use command::geo::GeoBy;
use command::geo::GeoEntry;
use command::geo::GeoFrom;
use command::geo::GeoSearchOptions;
use command::geo::GeoSearchReply;
use command::geo::GeoUnit;
use command::geo::WithFlags;
use command::scan;
use command::scan::ClusterScanCursor;
use command::scan::ScanCursor;
use command::scan::ScanOptions;
use command::scan::ScanState;
use command::set;
use engine::CommandKind;
use engine::Engine;
use log::debug;
use log::warn;
use reply::Reply;

use crate::batch::Batch;
use crate::config::ClientConfig;
use crate::error::ClientError;

/// One client wraps exclusive access to one engine handle.
pub struct Client<E: Engine> {
	engine: E,
	config: ClientConfig,
}

impl<E: Engine> Client<E> {
	pub fn new(engine: E, config: ClientConfig) -> Self {
		debug!("client bound to {}", config.addr);
		Self { engine, config }
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Start composing a batch. Entry points on the returned handle enqueue
	/// instead of executing; [`Client::exec`] runs the whole buffer.
	pub fn batch(&self) -> Batch {
		Batch::new()
	}

	/// Execute a batch FIFO, decoding each entry with its captured context.
	///
	/// The first engine failure aborts the run; no further engine
	/// interaction happens for the remaining entries.
	pub fn exec(&mut self, batch: Batch) -> Result<Vec<Payload>, ClientError> {
		let entries = batch.into_entries();
		debug!("executing batch of {} commands", entries.len());

		let mut results = Vec::with_capacity(entries.len());
		for cmd in entries {
			let reply = self.engine.execute(cmd.kind, cmd.args.as_slice())?;
			results.push(soften(cmd.kind, command::decode_shaped(&cmd.shape, &reply)));
		}
		Ok(results)
	}

	// --- set commands ---

	pub fn sadd(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = set::sadd(key.into(), collect_args(members))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn srem(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = set::srem(key.into(), collect_args(members))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn sismember(
		&mut self,
		key: impl Into<Bytes>,
		member: impl Into<Bytes>,
	) -> Result<bool, ClientError> {
		let cmd = set::sismember(key.into(), member.into())?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::bool_reply(&reply)))
	}

	pub fn smismember(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<Payload, ClientError> {
		let cmd = set::smismember(key.into(), collect_args(members))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::mixed_reply(&reply, Shaping::Flat)))
	}

	pub fn smembers(
		&mut self,
		key: impl Into<Bytes>,
	) -> Result<Option<Vec<Payload>>, ClientError> {
		let cmd = set::smembers(key.into())?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::collection_reply(&reply)))
	}

	pub fn scard(&mut self, key: impl Into<Bytes>) -> Result<Option<i64>, ClientError> {
		let cmd = set::scard(key.into())?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn spop(
		&mut self,
		key: impl Into<Bytes>,
		count: Option<i64>,
	) -> Result<Payload, ClientError> {
		let cmd = set::spop(key.into(), count)?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::mixed_reply(&reply, Shaping::Flat)))
	}

	pub fn srandmember(
		&mut self,
		key: impl Into<Bytes>,
		count: Option<i64>,
	) -> Result<Payload, ClientError> {
		let cmd = set::srandmember(key.into(), count)?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::mixed_reply(&reply, Shaping::Flat)))
	}

	pub fn smove(
		&mut self,
		src: impl Into<Bytes>,
		dst: impl Into<Bytes>,
		member: impl Into<Bytes>,
	) -> Result<bool, ClientError> {
		let cmd = set::smove(src.into(), dst.into(), member.into())?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::bool_reply(&reply)))
	}

	pub fn sinter(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<Option<Vec<Payload>>, ClientError> {
		let cmd = set::sinter(collect_keys(keys))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::collection_reply(&reply)))
	}

	pub fn sunion(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<Option<Vec<Payload>>, ClientError> {
		let cmd = set::sunion(collect_keys(keys))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::collection_reply(&reply)))
	}

	pub fn sdiff(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<Option<Vec<Payload>>, ClientError> {
		let cmd = set::sdiff(collect_keys(keys))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::collection_reply(&reply)))
	}

	pub fn sintercard(
		&mut self,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
		limit: Option<i64>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = set::sintercard(collect_keys(keys), limit)?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn sinterstore(
		&mut self,
		dst: impl Into<Bytes>,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = set::sinterstore(dst.into(), collect_keys(keys))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn sunionstore(
		&mut self,
		dst: impl Into<Bytes>,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = set::sunionstore(dst.into(), collect_keys(keys))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn sdiffstore(
		&mut self,
		dst: impl Into<Bytes>,
		keys: impl IntoIterator<Item = impl Into<Bytes>>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = set::sdiffstore(dst.into(), collect_keys(keys))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	// --- incremental iteration ---

	/// One keyspace SCAN step. Advances the cursor; the returned batch is
	/// decoded even on the terminal step.
	pub fn scan(
		&mut self,
		cursor: &mut ScanCursor,
		opts: &ScanOptions,
	) -> Result<Payload, ClientError> {
		let cmd = scan::scan(cursor.token(), &self.effective_scan_options(opts))?;
		let reply = self.invoke(&cmd)?;
		let page = soften(cmd.kind, scan::scan_page(&reply, Shaping::Flat));
		cursor.advance(&page.next_cursor);
		Ok(page.items)
	}

	/// One SSCAN step over a set key.
	pub fn sscan(
		&mut self,
		key: impl Into<Bytes>,
		cursor: &mut ScanCursor,
		opts: &ScanOptions,
	) -> Result<Payload, ClientError> {
		self.sub_scan(CommandKind::SScan, key.into(), cursor, opts)
	}

	/// One HSCAN step; the batch comes back as field/value pairs.
	pub fn hscan(
		&mut self,
		key: impl Into<Bytes>,
		cursor: &mut ScanCursor,
		opts: &ScanOptions,
	) -> Result<Payload, ClientError> {
		self.sub_scan(CommandKind::HScan, key.into(), cursor, opts)
	}

	/// One ZSCAN step; the batch comes back as member/score pairs.
	pub fn zscan(
		&mut self,
		key: impl Into<Bytes>,
		cursor: &mut ScanCursor,
		opts: &ScanOptions,
	) -> Result<Payload, ClientError> {
		self.sub_scan(CommandKind::ZScan, key.into(), cursor, opts)
	}

	fn sub_scan(
		&mut self,
		kind: CommandKind,
		key: Bytes,
		cursor: &mut ScanCursor,
		opts: &ScanOptions,
	) -> Result<Payload, ClientError> {
		let cmd = scan::sub_scan(kind, key, cursor.token(), &self.effective_scan_options(opts))?;
		let shaping = match &cmd.shape {
			ResponseShape::Scan { shaping } => *shaping,
			_ => Shaping::Flat,
		};
		let reply = self.invoke(&cmd)?;
		let page = soften(cmd.kind, scan::scan_page(&reply, shaping));
		cursor.advance(&page.next_cursor);
		Ok(page.items)
	}

	/// One cluster-aware SCAN step.
	///
	/// The opaque cursor identifier travels through the engine call rather
	/// than the argument vector. When the step reaches the terminal state
	/// the identifier that produced it is released, exactly once.
	pub fn cluster_scan(
		&mut self,
		cursor: &mut ClusterScanCursor,
		opts: &ScanOptions,
	) -> Result<Payload, ClientError> {
		let prev = cursor.token().to_string();
		let args = scan::cluster_scan_args(&self.effective_scan_options(opts));
		debug!("dispatching cluster SCAN from cursor {prev}");

		let reply = self.engine.cluster_scan(&prev, args.as_slice())?;
		let page = soften(CommandKind::Scan, scan::scan_page(&reply, Shaping::Flat));
		cursor.advance(&page.next_cursor);

		if cursor.state() == ScanState::Complete
			&& prev != scan::INITIAL_CURSOR
			&& cursor.mark_released()
		{
			self.engine.release_scan_cursor(&prev);
		}
		Ok(page.items)
	}

	/// Abandon a cluster scan, releasing the core-side cursor state if any
	/// is still held. Safe to call at any point; release happens at most
	/// once per cursor.
	pub fn release_cursor(&mut self, cursor: &mut ClusterScanCursor) {
		if cursor.state() == ScanState::InProgress && cursor.mark_released() {
			let token = cursor.token().to_string();
			self.engine.release_scan_cursor(&token);
		}
		cursor.finish();
	}

	// --- geo commands ---

	pub fn geoadd(
		&mut self,
		key: impl Into<Bytes>,
		entries: impl IntoIterator<Item = GeoEntry>,
	) -> Result<Option<i64>, ClientError> {
		let cmd = geo::geoadd(key.into(), entries.into_iter().collect())?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	pub fn geodist(
		&mut self,
		key: impl Into<Bytes>,
		src: impl Into<Bytes>,
		dst: impl Into<Bytes>,
		unit: Option<GeoUnit>,
	) -> Result<Option<f64>, ClientError> {
		let cmd = geo::geodist(key.into(), src.into(), dst.into(), unit)?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::double_reply(&reply)))
	}

	pub fn geohash(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<Vec<Option<Bytes>>, ClientError> {
		let cmd = geo::geohash(key.into(), collect_args(members))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, geo::geo_hash_reply(&reply)))
	}

	pub fn geopos(
		&mut self,
		key: impl Into<Bytes>,
		members: impl IntoIterator<Item = impl Into<Arg>>,
	) -> Result<Vec<Option<(f64, f64)>>, ClientError> {
		let cmd = geo::geopos(key.into(), collect_args(members))?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, geo::geo_pos_reply(&reply)))
	}

	pub fn geosearch(
		&mut self,
		key: impl Into<Bytes>,
		from: GeoFrom,
		by: GeoBy,
		unit: GeoUnit,
		opts: &GeoSearchOptions,
	) -> Result<GeoSearchReply, ClientError> {
		let flags = WithFlags::from_options(opts);
		let cmd = geo::geosearch(key.into(), from, by, unit, opts)?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, geo::geo_search_reply(&reply, flags)))
	}

	pub fn geosearchstore(
		&mut self,
		dest: impl Into<Bytes>,
		src: impl Into<Bytes>,
		from: GeoFrom,
		by: GeoBy,
		unit: GeoUnit,
		opts: &GeoSearchOptions,
	) -> Result<Option<i64>, ClientError> {
		let cmd = geo::geosearchstore(dest.into(), src.into(), from, by, unit, opts)?;
		let reply = self.invoke(&cmd)?;
		Ok(soften(cmd.kind, decode::int_reply(&reply)))
	}

	// --- plumbing ---

	fn invoke(&mut self, cmd: &Command) -> Result<Reply, ClientError> {
		debug!("dispatching {} ({} args)", cmd.kind, cmd.args.len());
		Ok(self.engine.execute(cmd.kind, cmd.args.as_slice())?)
	}

	/// Scan steps always carry a COUNT hint; fall back to the configured
	/// default when the caller leaves it out.
	fn effective_scan_options(&self, opts: &ScanOptions) -> ScanOptions {
		let mut opts = opts.clone();
		if opts.count.is_none() {
			opts.count = Some(self.config.scan_count);
		}
		opts
	}
}

fn collect_args(items: impl IntoIterator<Item = impl Into<Arg>>) -> Vec<Arg> {
	items.into_iter().map(Into::into).collect()
}

fn collect_keys(keys: impl IntoIterator<Item = impl Into<Bytes>>) -> Vec<Bytes> {
	keys.into_iter().map(Into::into).collect()
}

/// Unwrap a decode outcome, logging when the reply shape was off.
fn soften<T>(kind: CommandKind, decoded: Decoded<T>) -> T {
	if !decoded.matched {
		warn!("unexpected reply shape for {kind}, returning empty result");
	}
	decoded.value
}
