//! Boundary to the pre-built client core.
//!
//! Everything below this trait is out of scope for the binding: transport,
//! connection establishment, authentication, cluster routing and retries all
//! live in the core. The binding only hands over an ordered byte-string
//! argument vector and receives a [`reply::Reply`] back.

mod error;
mod kind;

use bytes::Bytes;
use reply::Reply;

pub use error::EngineError;
pub use kind::CommandKind;

/// Synchronous, blocking execution boundary.
///
/// One engine handle backs one connection context. Methods take `&mut self`:
/// a handle has a single writer, and the binding never shares one across
/// threads.
pub trait Engine {
	/// Execute one command with its prepared argument vector.
	fn execute(&mut self, kind: CommandKind, args: &[Bytes]) -> Result<Reply, EngineError>;

	/// Cluster-aware keyspace scan step.
	///
	/// The cursor identifier travels out-of-band; `args` carries only the
	/// MATCH/COUNT/TYPE tokens. The returned payload embeds the next cursor
	/// token, which may be the core's `"finished"` sentinel.
	fn cluster_scan(&mut self, cursor: &str, args: &[Bytes]) -> Result<Reply, EngineError>;

	/// Release a cluster scan cursor held by the core.
	///
	/// Cluster cursors key into core-side state; the binding calls this
	/// exactly once per cursor when a scan finishes or is abandoned. Engines
	/// without cursor state can keep the default no-op.
	fn release_scan_cursor(&mut self, _cursor: &str) {}
}
