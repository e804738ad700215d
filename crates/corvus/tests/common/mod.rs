//! Scripted engine for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bytes::Bytes;
use corvus::CommandKind;
use corvus::Engine;
use corvus::EngineError;
use corvus::Reply;

#[derive(Default)]
pub struct FakeState {
	pub replies: VecDeque<Result<Reply, EngineError>>,
	pub calls: Vec<(CommandKind, Vec<Vec<u8>>)>,
	pub cluster_calls: Vec<(String, Vec<Vec<u8>>)>,
	pub released: Vec<String>,
}

/// Hands back queued replies in order and records every engine interaction.
/// The shared state handle lets tests inspect the recording after the
/// client has taken ownership of the engine.
pub struct FakeEngine {
	state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
	pub fn new(replies: Vec<Result<Reply, EngineError>>) -> (Self, Rc<RefCell<FakeState>>) {
		let state = Rc::new(RefCell::new(FakeState {
			replies: replies.into_iter().collect(),
			..FakeState::default()
		}));
		(
			Self {
				state: Rc::clone(&state),
			},
			state,
		)
	}

	pub fn with_replies(replies: Vec<Reply>) -> (Self, Rc<RefCell<FakeState>>) {
		Self::new(replies.into_iter().map(Ok).collect())
	}
}

impl Engine for FakeEngine {
	fn execute(&mut self, kind: CommandKind, args: &[Bytes]) -> Result<Reply, EngineError> {
		let mut state = self.state.borrow_mut();
		state
			.calls
			.push((kind, args.iter().map(|b| b.to_vec()).collect()));
		state.replies.pop_front().unwrap_or(Ok(Reply::Null))
	}

	fn cluster_scan(&mut self, cursor: &str, args: &[Bytes]) -> Result<Reply, EngineError> {
		let mut state = self.state.borrow_mut();
		state
			.cluster_calls
			.push((cursor.to_string(), args.iter().map(|b| b.to_vec()).collect()));
		state.replies.pop_front().unwrap_or(Ok(Reply::Null))
	}

	fn release_scan_cursor(&mut self, cursor: &str) {
		self.state.borrow_mut().released.push(cursor.to_string());
	}
}

/// Build a two-element scan page reply.
pub fn scan_reply(cursor: &str, items: Vec<Reply>) -> Reply {
	Reply::array(vec![Reply::str(cursor.to_string()), Reply::array(items)])
}
