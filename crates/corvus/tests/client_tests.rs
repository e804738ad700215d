//! Integration tests for the synchronous command surface and batching.

mod common;

use bytes::Bytes;
use common::FakeEngine;
use corvus::Client;
use corvus::ClientConfig;
use corvus::ClientError;
use corvus::CommandKind;
use corvus::EncodeError;
use corvus::EngineError;
use corvus::GeoBy;
use corvus::GeoEntry;
use corvus::GeoFrom;
use corvus::GeoSearchOptions;
use corvus::GeoSearchReply;
use corvus::GeoUnit;
use corvus::Payload;
use corvus::Reply;

fn client(replies: Vec<Reply>) -> (Client<FakeEngine>, std::rc::Rc<std::cell::RefCell<common::FakeState>>) {
	let (engine, state) = FakeEngine::with_replies(replies);
	(Client::new(engine, ClientConfig::default()), state)
}

#[test]
fn test_sadd_encodes_key_then_members() {
	let (mut client, state) = client(vec![Reply::Int(2)]);

	let added = client.sadd("fruit", ["apple", "pear"]).unwrap();
	assert_eq!(added, Some(2));

	let state = state.borrow();
	let (kind, args) = &state.calls[0];
	assert_eq!(*kind, CommandKind::SAdd);
	assert_eq!(args.len(), 3);
	assert_eq!(args[0], b"fruit");
	assert_eq!(args[1], b"apple");
}

#[test]
fn test_geoadd_encodes_triplets_and_decodes_count() {
	let (mut client, state) = client(vec![Reply::Int(2)]);

	let added = client
		.geoadd(
			"pts",
			vec![
				GeoEntry::new(13.361389, 38.115556, "Palermo"),
				GeoEntry::new(15.087269, 37.502669, "Catania"),
			],
		)
		.unwrap();
	assert_eq!(added, Some(2));

	let state = state.borrow();
	let (kind, args) = &state.calls[0];
	assert_eq!(*kind, CommandKind::GeoAdd);
	let expected: Vec<&[u8]> = vec![
		b"pts",
		b"13.361389",
		b"38.115556",
		b"Palermo",
		b"15.087269",
		b"37.502669",
		b"Catania",
	];
	assert_eq!(args.len(), expected.len());
	for (arg, want) in args.iter().zip(expected) {
		assert_eq!(arg.as_slice(), want);
	}
}

#[test]
fn test_engine_error_propagates_verbatim() {
	let message = "WRONGTYPE Operation against a key holding the wrong kind of value";
	let (engine, state) =
		FakeEngine::new(vec![Err(EngineError::Command(message.to_string()))]);
	let mut client = Client::new(engine, ClientConfig::default());

	let err = client.sismember("k", "m").unwrap_err();
	match err {
		ClientError::Engine(EngineError::Command(msg)) => assert_eq!(msg, message),
		other => panic!("expected engine error, got {other:?}"),
	}
	assert_eq!(state.borrow().calls.len(), 1);
}

#[test]
fn test_encode_error_makes_no_engine_call() {
	let (mut client, state) = client(vec![]);

	let err = client.sadd("fruit", Vec::<&str>::new()).unwrap_err();
	assert!(matches!(
		err,
		ClientError::Encode(EncodeError::Arity("sadd"))
	));
	assert!(state.borrow().calls.is_empty());
}

#[test]
fn test_decode_mismatch_softens_instead_of_failing() {
	// SCARD answered with a string: shape mismatch, zero result, no error.
	let (mut client, _state) = client(vec![Reply::str("not-a-number")]);
	assert_eq!(client.scard("k").unwrap(), Some(0));
}

#[test]
fn test_smembers_null_stays_null() {
	let (mut client, _state) = client(vec![Reply::Null]);
	assert_eq!(client.smembers("missing").unwrap(), None);
}

#[test]
fn test_smembers_set_reply() {
	let set = Reply::Set(vec![Reply::str("a"), Reply::str("b")]);
	let (mut client, _state) = client(vec![set]);

	let members = client.smembers("s").unwrap().unwrap();
	assert_eq!(members.len(), 2);
	assert_eq!(members[0], Payload::Bytes(Bytes::from_static(b"a")));
}

#[test]
fn test_spop_scalar_and_counted_forms() {
	let (mut client, state) = client(vec![
		Reply::str("one"),
		Reply::array(vec![Reply::str("one"), Reply::str("two")]),
	]);

	let single = client.spop("s", None).unwrap();
	assert_eq!(single, Payload::Bytes(Bytes::from_static(b"one")));

	let popped = client.spop("s", Some(2)).unwrap();
	assert_eq!(popped.as_list().unwrap().len(), 2);

	let state = state.borrow();
	assert_eq!(state.calls[0].1.len(), 1);
	assert_eq!(state.calls[1].1.len(), 2);
	assert_eq!(state.calls[1].1[1], b"2");
}

#[test]
fn test_geodist_decodes_string_wire_form() {
	let (mut client, state) = client(vec![Reply::str("166.2742")]);

	let dist = client
		.geodist("pts", "Palermo", "Catania", Some(GeoUnit::Kilometers))
		.unwrap();
	assert_eq!(dist, Some(166.2742));

	let state = state.borrow();
	assert_eq!(state.calls[0].1.len(), 4);
	assert_eq!(state.calls[0].1[3], b"km");
}

#[test]
fn test_geosearch_with_flags() {
	let reply = Reply::array(vec![Reply::array(vec![
		Reply::str("Palermo"),
		Reply::array(vec![
			Reply::str("190.4424"),
			Reply::array(vec![Reply::str("13.361389"), Reply::str("38.115556")]),
		]),
	])]);
	let (mut client, _state) = client(vec![reply]);

	let opts = GeoSearchOptions::new().with_dist().with_coord();
	let result = client
		.geosearch(
			"pts",
			GeoFrom::LonLat(15.0, 37.0),
			GeoBy::Radius(200.0),
			GeoUnit::Kilometers,
			&opts,
		)
		.unwrap();

	let GeoSearchReply::Matches(matches) = result else {
		panic!("expected matches");
	};
	assert_eq!(matches.len(), 1);
	assert_eq!(matches[0].dist, Some(190.4424));
	assert_eq!(matches[0].hash, None);
	assert!(matches[0].coord.is_some());
}

#[test]
fn test_batch_runs_fifo_with_captured_contexts() {
	// A decodes as Int, B as Bool, C as a flagged geo search: three
	// different decode contexts travelling through one buffer.
	let geo_reply = Reply::array(vec![Reply::array(vec![
		Reply::str("Palermo"),
		Reply::array(vec![Reply::str("190.4424")]),
	])]);
	let (mut client, state) = client(vec![Reply::Int(1), Reply::Bool(true), geo_reply]);

	let mut batch = client.batch();
	batch
		.sadd("s", ["a"])
		.unwrap()
		.sismember("s", "a")
		.unwrap()
		.geosearch(
			"pts",
			GeoFrom::Member(Bytes::from_static(b"Palermo")),
			GeoBy::Radius(200.0),
			GeoUnit::Kilometers,
			&GeoSearchOptions::new().with_dist(),
		)
		.unwrap();
	assert_eq!(batch.len(), 3);

	let results = client.exec(batch).unwrap();

	let state = state.borrow();
	let kinds: Vec<CommandKind> = state.calls.iter().map(|(k, _)| *k).collect();
	assert_eq!(
		kinds,
		vec![
			CommandKind::SAdd,
			CommandKind::SIsMember,
			CommandKind::GeoSearch
		]
	);

	assert_eq!(results[0], Payload::Int(1));
	assert_eq!(results[1], Payload::Bool(true));
	let pairs = results[2].as_pairs().unwrap();
	assert_eq!(&pairs[0].0[..], b"Palermo");
	assert_eq!(pairs[0].1.as_list().unwrap()[0], Payload::Float(190.4424));
}

#[test]
fn test_batch_encode_failure_enqueues_nothing() {
	let (client, _state) = client(vec![]);

	let mut batch = client.batch();
	assert!(batch.sadd("s", Vec::<&str>::new()).is_err());
	assert!(batch.is_empty());
}

#[test]
fn test_batch_aborts_on_first_engine_failure() {
	let (engine, state) = FakeEngine::new(vec![
		Ok(Reply::Int(1)),
		Err(EngineError::Fault("connection dropped".to_string())),
	]);
	let mut client = Client::new(engine, ClientConfig::default());

	let mut batch = client.batch();
	batch
		.scard("a")
		.unwrap()
		.scard("b")
		.unwrap()
		.scard("c")
		.unwrap();

	assert!(client.exec(batch).is_err());
	// The failing call is the last engine interaction; entry three never runs.
	assert_eq!(state.borrow().calls.len(), 2);
}

#[test]
fn test_smove_status_reply_counts_as_success() {
	let (mut client, _state) = client(vec![Reply::Ok]);
	assert!(client.smove("a", "b", "m").unwrap());
}

#[test]
fn test_sintercard_wire_layout() {
	let (mut client, state) = client(vec![Reply::Int(2)]);

	let n = client.sintercard(["a", "b"], Some(5)).unwrap();
	assert_eq!(n, Some(2));

	let state = state.borrow();
	let args = &state.calls[0].1;
	let expected: Vec<&[u8]> = vec![b"2", b"a", b"b", b"LIMIT", b"5"];
	assert_eq!(args.len(), expected.len());
	for (arg, want) in args.iter().zip(expected) {
		assert_eq!(arg.as_slice(), want);
	}
}
