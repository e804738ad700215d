//! Client-side batch buffer.

use crate::dispatch::Command;

/// FIFO queue of not-yet-executed commands.
///
/// Entries are complete [`Command`] values captured at enqueue time and
/// never mutated afterwards; execution consumes them in insertion order.
/// Enqueueing performs no engine interaction.
#[derive(Debug, Default)]
pub struct BatchBuffer {
	entries: Vec<Command>,
}

impl BatchBuffer {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	pub fn enqueue(&mut self, command: Command) {
		self.entries.push(command);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn entries(&self) -> &[Command] {
		&self.entries
	}

	/// Consume the buffer in insertion order.
	pub fn into_entries(self) -> Vec<Command> {
		self.entries
	}
}

#[cfg(test)]
mod tests {
	use engine::CommandKind;

	use super::*;
	use crate::args::ArgBuffer;
	use crate::dispatch::ResponseShape;

	fn entry(kind: CommandKind, shape: ResponseShape) -> Command {
		let mut args = ArgBuffer::new();
		args.push_literal("k");
		Command::new(kind, shape, args)
	}

	#[test]
	fn test_fifo_order_with_mixed_shapes() {
		let mut buffer = BatchBuffer::new();
		buffer.enqueue(entry(CommandKind::SAdd, ResponseShape::Int));
		buffer.enqueue(entry(CommandKind::SIsMember, ResponseShape::Bool));
		buffer.enqueue(entry(CommandKind::SMembers, ResponseShape::Collection));
		assert_eq!(buffer.len(), 3);

		let kinds: Vec<CommandKind> =
			buffer.into_entries().into_iter().map(|c| c.kind).collect();
		assert_eq!(
			kinds,
			vec![CommandKind::SAdd, CommandKind::SIsMember, CommandKind::SMembers]
		);
	}
}
