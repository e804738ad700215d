//! Incremental iteration: cursors, scan builders and page decoding.
//!
//! The wire token `"0"` is both the initial and the terminal cursor marker.
//! Cursors therefore carry an explicit `started` bit; the raw token is never
//! the sole state indicator.

use bytes::Bytes;
use engine::CommandKind;
use reply::Reply;

use crate::args::ArgBuffer;
use crate::decode::Decoded;
use crate::decode::Payload;
use crate::decode::Shaping;
use crate::decode::convert;
use crate::dispatch::Command;
use crate::dispatch::ResponseShape;
use crate::error::EncodeError;

/// Initial and terminal cursor marker.
pub const INITIAL_CURSOR: &str = "0";

/// Sentinel the core returns when a cluster scan has been exhausted.
pub const FINISHED_SENTINEL: &str = "finished";

/// Caller-visible progress of an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
	NotStarted,
	InProgress,
	Complete,
}

/// Standalone scan cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCursor {
	token: String,
	started: bool,
}

impl ScanCursor {
	pub fn new() -> Self {
		Self {
			token: INITIAL_CURSOR.to_string(),
			started: false,
		}
	}

	/// Resume iteration from a previously returned token.
	pub fn resume(token: impl Into<String>) -> Self {
		Self {
			token: token.into(),
			started: true,
		}
	}

	pub fn token(&self) -> &str {
		&self.token
	}

	pub fn state(&self) -> ScanState {
		match (self.started, self.token.as_str()) {
			(false, _) => ScanState::NotStarted,
			(true, INITIAL_CURSOR) => ScanState::Complete,
			(true, _) => ScanState::InProgress,
		}
	}

	pub fn has_more(&self) -> bool {
		self.state() != ScanState::Complete
	}

	/// Record the server-issued continuation token.
	pub fn advance(&mut self, next_token: &str) {
		self.started = true;
		self.token.clear();
		self.token.push_str(next_token);
	}

	/// Force the terminal state.
	pub fn finish(&mut self) {
		self.advance(INITIAL_CURSOR);
	}
}

impl Default for ScanCursor {
	fn default() -> Self {
		Self::new()
	}
}

/// Cluster scan cursor.
///
/// Holds the core's opaque cursor identifier, which keys into core-side
/// state and must be released exactly once when iteration finishes or is
/// abandoned. The core's `"finished"` sentinel is normalized onto the plain
/// terminal marker during [`ClusterScanCursor::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterScanCursor {
	token: String,
	started: bool,
	released: bool,
}

impl ClusterScanCursor {
	pub fn new() -> Self {
		Self {
			token: INITIAL_CURSOR.to_string(),
			started: false,
			released: false,
		}
	}

	pub fn token(&self) -> &str {
		&self.token
	}

	pub fn state(&self) -> ScanState {
		match (self.started, self.token.as_str()) {
			(false, _) => ScanState::NotStarted,
			(true, INITIAL_CURSOR) => ScanState::Complete,
			(true, _) => ScanState::InProgress,
		}
	}

	pub fn has_more(&self) -> bool {
		self.state() != ScanState::Complete
	}

	/// Record the next cursor identifier, mapping the core's finished
	/// sentinel onto the terminal marker.
	pub fn advance(&mut self, next_token: &str) {
		self.started = true;
		self.token.clear();
		if next_token == FINISHED_SENTINEL {
			self.token.push_str(INITIAL_CURSOR);
		} else {
			self.token.push_str(next_token);
		}
	}

	/// Force the terminal state.
	pub fn finish(&mut self) {
		self.advance(INITIAL_CURSOR);
	}

	/// Whether the identifier still needs a release call.
	pub fn needs_release(&self) -> bool {
		self.started && !self.released
	}

	/// Mark the identifier as released; returns false if it already was.
	pub fn mark_released(&mut self) -> bool {
		if self.released {
			return false;
		}
		self.released = true;
		true
	}
}

impl Default for ClusterScanCursor {
	fn default() -> Self {
		Self::new()
	}
}

/// Optional SCAN-family modifiers.
///
/// `type_filter` is only meaningful for the top-level keyspace scan; the
/// per-key scans reject it at encode time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOptions {
	pub pattern: Option<Bytes>,
	pub count: Option<i64>,
	pub type_filter: Option<Bytes>,
}

impl ScanOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn pattern(mut self, pattern: impl Into<Bytes>) -> Self {
		self.pattern = Some(pattern.into());
		self
	}

	pub fn count(mut self, count: i64) -> Self {
		self.count = Some(count);
		self
	}

	pub fn type_filter(mut self, type_filter: impl Into<Bytes>) -> Self {
		self.type_filter = Some(type_filter.into());
		self
	}
}

/// SCAN cursor [MATCH pattern] [COUNT n] [TYPE t]
pub fn scan(cursor_token: &str, opts: &ScanOptions) -> Result<Command, EncodeError> {
	let mut args = ArgBuffer::with_capacity(1 + option_arg_count(opts));
	args.push(cursor_token.to_string());
	push_options(&mut args, opts);
	Ok(Command::new(
		CommandKind::Scan,
		ResponseShape::Scan {
			shaping: Shaping::Flat,
		},
		args,
	))
}

/// SSCAN/HSCAN/ZSCAN key cursor [MATCH pattern] [COUNT n]
pub fn sub_scan(
	kind: CommandKind,
	key: Bytes,
	cursor_token: &str,
	opts: &ScanOptions,
) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}
	if opts.type_filter.is_some() {
		return Err(EncodeError::InvalidOption(
			sub_scan_name(kind),
			"TYPE is only valid for SCAN",
		));
	}

	let shaping = match kind {
		CommandKind::HScan | CommandKind::ZScan => Shaping::Associative,
		_ => Shaping::Flat,
	};

	let mut args = ArgBuffer::with_capacity(2 + option_arg_count(opts));
	args.push(key);
	args.push(cursor_token.to_string());
	push_options(&mut args, opts);
	Ok(Command::new(kind, ResponseShape::Scan { shaping }, args))
}

/// MATCH/COUNT/TYPE tokens for the cluster scan; the cursor identifier
/// travels out-of-band through the engine call.
pub fn cluster_scan_args(opts: &ScanOptions) -> ArgBuffer {
	let mut args = ArgBuffer::with_capacity(option_arg_count(opts));
	push_options(&mut args, opts);
	args
}

fn option_arg_count(opts: &ScanOptions) -> usize {
	let mut count = 0;
	if opts.pattern.is_some() {
		count += 2;
	}
	if opts.count.is_some() {
		count += 2;
	}
	if opts.type_filter.is_some() {
		count += 2;
	}
	count
}

fn push_options(args: &mut ArgBuffer, opts: &ScanOptions) {
	if let Some(pattern) = &opts.pattern {
		args.push_literal("MATCH");
		args.push(pattern.clone());
	}
	if let Some(count) = opts.count {
		args.push_literal("COUNT");
		args.push_int(count);
	}
	if let Some(type_filter) = &opts.type_filter {
		args.push_literal("TYPE");
		args.push(type_filter.clone());
	}
}

fn sub_scan_name(kind: CommandKind) -> &'static str {
	match kind {
		CommandKind::HScan => "hscan",
		CommandKind::ZScan => "zscan",
		_ => "sscan",
	}
}

/// One decoded scan step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage {
	/// Next cursor token, exactly as the server issued it.
	pub next_cursor: String,
	/// The step's result batch; pairs for associative scans, a list
	/// otherwise. Decoded even on the terminal step.
	pub items: Payload,
}

/// Decode a two-element scan response: `[next-cursor, batch]`.
///
/// Any shape mismatch forces the terminal cursor with an empty batch, so a
/// confused iteration always ends rather than spinning.
pub fn scan_page(reply: &Reply, shaping: Shaping) -> Decoded<ScanPage> {
	let empty = |shaping| match shaping {
		Shaping::Associative => Payload::Pairs(Vec::new()),
		Shaping::Flat => Payload::List(Vec::new()),
	};

	let Some(parts) = reply.as_array() else {
		return Decoded::fallback(ScanPage {
			next_cursor: INITIAL_CURSOR.to_string(),
			items: empty(shaping),
		});
	};

	let (Some(cursor), Some(batch)) = (
		parts.first().and_then(Reply::as_bytes),
		parts.get(1).filter(|r| r.as_items().is_some()),
	) else {
		return Decoded::fallback(ScanPage {
			next_cursor: INITIAL_CURSOR.to_string(),
			items: empty(shaping),
		});
	};

	Decoded::clean(ScanPage {
		next_cursor: String::from_utf8_lossy(cursor).into_owned(),
		items: convert(batch, shaping),
	})
}
