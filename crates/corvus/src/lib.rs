//! # Corvus
//!
//! A thin, typed command surface over a pre-built client core. The binding
//! marshals caller values into wire argument vectors, hands them to an
//! [`Engine`], and decodes the typed response back into caller values. The
//! engine owns everything below that line: transport, connections,
//! authentication, cluster routing, retries.
//!
//! ## Example
//!
//! ```no_run
//! use corvus::{Client, ClientConfig, Engine};
//!
//! fn demo(engine: impl Engine) -> Result<(), corvus::ClientError> {
//! 	let mut client = Client::new(engine, ClientConfig::default());
//! 	client.sadd("fruit", ["apple", "pear"])?;
//! 	let n = client.scard("fruit")?;
//! 	log::info!("cardinality: {n:?}");
//! 	Ok(())
//! }
//! ```

mod batch;
mod client;
mod config;
mod error;

pub use batch::Batch;
pub use client::Client;
pub use config::ClientConfig;
pub use config::DEFAULT_SCAN_COUNT;
pub use error::ClientError;

// The vocabulary callers need to drive the client.
pub use command::Arg;
pub use command::EncodeError;
pub use command::decode::Payload;
pub use command::geo::GeoBy;
pub use command::geo::GeoEntry;
pub use command::geo::GeoFrom;
pub use command::geo::GeoMatch;
pub use command::geo::GeoSearchOptions;
pub use command::geo::GeoSearchReply;
pub use command::geo::GeoSort;
pub use command::geo::GeoUnit;
pub use command::scan::ClusterScanCursor;
pub use command::scan::ScanCursor;
pub use command::scan::ScanOptions;
pub use command::scan::ScanState;
pub use engine::CommandKind;
pub use engine::Engine;
pub use engine::EngineError;
pub use reply::Reply;
