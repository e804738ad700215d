//! Basic usage of the corvus client against a toy in-memory engine.
//!
//! The real deployment hands the client a handle into the native core; this
//! example stands a tiny set-only engine behind the same trait so the
//! binding can be driven end to end.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use bytes::Bytes;
use corvus::Client;
use corvus::ClientConfig;
use corvus::CommandKind;
use corvus::Engine;
use corvus::EngineError;
use corvus::Reply;

#[derive(Default)]
struct ToyEngine {
	sets: BTreeMap<Bytes, BTreeSet<Bytes>>,
}

impl Engine for ToyEngine {
	fn execute(&mut self, kind: CommandKind, args: &[Bytes]) -> Result<Reply, EngineError> {
		match kind {
			CommandKind::SAdd => {
				let set = self.sets.entry(args[0].clone()).or_default();
				let mut added = 0;
				for member in &args[1..] {
					if set.insert(member.clone()) {
						added += 1;
					}
				}
				Ok(Reply::Int(added))
			}
			CommandKind::SCard => {
				let len = self.sets.get(&args[0]).map_or(0, BTreeSet::len);
				Ok(Reply::Int(len as i64))
			}
			CommandKind::SMembers => {
				let members = self
					.sets
					.get(&args[0])
					.map(|set| set.iter().map(|m| Reply::Str(m.clone())).collect())
					.unwrap_or_default();
				Ok(Reply::Set(members))
			}
			CommandKind::SIsMember => {
				let found = self
					.sets
					.get(&args[0])
					.is_some_and(|set| set.contains(&args[1]));
				Ok(Reply::Bool(found))
			}
			_ => Ok(Reply::Null),
		}
	}

	fn cluster_scan(&mut self, _cursor: &str, _args: &[Bytes]) -> Result<Reply, EngineError> {
		Ok(Reply::array(vec![Reply::str("0"), Reply::array(vec![])]))
	}
}

fn main() -> Result<(), corvus::ClientError> {
	telemetry::init("debug");

	let mut client = Client::new(ToyEngine::default(), ClientConfig::default());

	let added = client.sadd("fruit", ["apple", "pear", "plum"])?;
	log::info!("added {added:?} members");

	let n = client.scard("fruit")?;
	log::info!("cardinality: {n:?}");

	log::info!("apple present: {}", client.sismember("fruit", "apple")?);
	log::info!("members: {:?}", client.smembers("fruit")?);

	// Compose a batch; nothing executes until exec drains it FIFO.
	let mut batch = client.batch();
	batch.sadd("fruit", ["quince"])?.scard("fruit")?;
	let results = client.exec(batch)?;
	log::info!("batch results: {results:?}");

	Ok(())
}
