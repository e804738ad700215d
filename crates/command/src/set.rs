//! Set command builders.
//!
//! One builder per command, grouped by argument category: key+members,
//! key-only, key+member, key+count, multi-key, multi-key+limit,
//! destination+multi-key, two-key+member.

use bytes::Bytes;
use engine::CommandKind;

use crate::args::Arg;
use crate::args::ArgBuffer;
use crate::dispatch::Command;
use crate::dispatch::ResponseShape;
use crate::error::EncodeError;

/// SADD key member [member ...]
pub fn sadd(key: Bytes, members: Vec<Arg>) -> Result<Command, EncodeError> {
	key_members(CommandKind::SAdd, ResponseShape::Int, "sadd", key, members)
}

/// SREM key member [member ...]
pub fn srem(key: Bytes, members: Vec<Arg>) -> Result<Command, EncodeError> {
	key_members(CommandKind::SRem, ResponseShape::Int, "srem", key, members)
}

/// SMISMEMBER key member [member ...]
pub fn smismember(key: Bytes, members: Vec<Arg>) -> Result<Command, EncodeError> {
	key_members(
		CommandKind::SMIsMember,
		ResponseShape::Mixed,
		"smismember",
		key,
		members,
	)
}

/// SISMEMBER key member
pub fn sismember(key: Bytes, member: Bytes) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}
	if member.is_empty() {
		return Err(EncodeError::Missing("member"));
	}

	let mut args = ArgBuffer::with_capacity(2);
	args.push(key);
	args.push(member);
	Ok(Command::new(CommandKind::SIsMember, ResponseShape::Bool, args))
}

/// SMEMBERS key
pub fn smembers(key: Bytes) -> Result<Command, EncodeError> {
	key_only(CommandKind::SMembers, ResponseShape::Collection, key)
}

/// SCARD key
pub fn scard(key: Bytes) -> Result<Command, EncodeError> {
	key_only(CommandKind::SCard, ResponseShape::Int, key)
}

/// SPOP key [count]
pub fn spop(key: Bytes, count: Option<i64>) -> Result<Command, EncodeError> {
	key_count(CommandKind::SPop, key, count)
}

/// SRANDMEMBER key [count]
pub fn srandmember(key: Bytes, count: Option<i64>) -> Result<Command, EncodeError> {
	key_count(CommandKind::SRandMember, key, count)
}

/// SMOVE src dst member
pub fn smove(src: Bytes, dst: Bytes, member: Bytes) -> Result<Command, EncodeError> {
	if src.is_empty() || dst.is_empty() {
		return Err(EncodeError::Missing("key"));
	}
	if member.is_empty() {
		return Err(EncodeError::Missing("member"));
	}

	let mut args = ArgBuffer::with_capacity(3);
	args.push(src);
	args.push(dst);
	args.push(member);
	Ok(Command::new(CommandKind::SMove, ResponseShape::Bool, args))
}

/// SINTER key [key ...]
pub fn sinter(keys: Vec<Bytes>) -> Result<Command, EncodeError> {
	multi_key(CommandKind::SInter, "sinter", keys)
}

/// SUNION key [key ...]
pub fn sunion(keys: Vec<Bytes>) -> Result<Command, EncodeError> {
	multi_key(CommandKind::SUnion, "sunion", keys)
}

/// SDIFF key [key ...]
pub fn sdiff(keys: Vec<Bytes>) -> Result<Command, EncodeError> {
	multi_key(CommandKind::SDiff, "sdiff", keys)
}

/// SINTERCARD numkeys key [key ...] [LIMIT n]
pub fn sintercard(keys: Vec<Bytes>, limit: Option<i64>) -> Result<Command, EncodeError> {
	if keys.is_empty() {
		return Err(EncodeError::Arity("sintercard"));
	}
	if let Some(limit) = limit
		&& limit < 0
	{
		return Err(EncodeError::InvalidOption("sintercard", "LIMIT must not be negative"));
	}

	let mut args =
		ArgBuffer::with_capacity(1 + keys.len() + if limit.is_some() { 2 } else { 0 });
	args.push_int(keys.len() as i64);
	for key in keys {
		args.push(key);
	}
	if let Some(limit) = limit {
		args.push_literal("LIMIT");
		args.push_int(limit);
	}
	Ok(Command::new(CommandKind::SInterCard, ResponseShape::Int, args))
}

/// SINTERSTORE dst key [key ...]
pub fn sinterstore(dst: Bytes, keys: Vec<Bytes>) -> Result<Command, EncodeError> {
	dst_multi_key(CommandKind::SInterStore, "sinterstore", dst, keys)
}

/// SUNIONSTORE dst key [key ...]
pub fn sunionstore(dst: Bytes, keys: Vec<Bytes>) -> Result<Command, EncodeError> {
	dst_multi_key(CommandKind::SUnionStore, "sunionstore", dst, keys)
}

/// SDIFFSTORE dst key [key ...]
pub fn sdiffstore(dst: Bytes, keys: Vec<Bytes>) -> Result<Command, EncodeError> {
	dst_multi_key(CommandKind::SDiffStore, "sdiffstore", dst, keys)
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

fn key_only(kind: CommandKind, shape: ResponseShape, key: Bytes) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}

	let mut args = ArgBuffer::with_capacity(1);
	args.push(key);
	Ok(Command::new(kind, shape, args))
}

fn key_count(kind: CommandKind, key: Bytes, count: Option<i64>) -> Result<Command, EncodeError> {
	if key.is_empty() {
		return Err(EncodeError::Missing("key"));
	}

	let mut args = ArgBuffer::with_capacity(if count.is_some() { 2 } else { 1 });
	args.push(key);
	if let Some(count) = count {
		args.push_int(count);
	}
	Ok(Command::new(kind, ResponseShape::Mixed, args))
}

fn multi_key(
	kind: CommandKind,
	name: &'static str,
	keys: Vec<Bytes>,
) -> Result<Command, EncodeError> {
	if keys.is_empty() {
		return Err(EncodeError::Arity(name));
	}

	let mut args = ArgBuffer::with_capacity(keys.len());
	for key in keys {
		args.push(key);
	}
	Ok(Command::new(kind, ResponseShape::Collection, args))
}

fn dst_multi_key(
	kind: CommandKind,
	name: &'static str,
	dst: Bytes,
	keys: Vec<Bytes>,
) -> Result<Command, EncodeError> {
	if dst.is_empty() {
		return Err(EncodeError::Missing("destination"));
	}
	if keys.is_empty() {
		return Err(EncodeError::Arity(name));
	}

	let mut args = ArgBuffer::with_capacity(1 + keys.len());
	args.push(dst);
	for key in keys {
		args.push(key);
	}
	Ok(Command::new(kind, ResponseShape::Int, args))
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn keys(names: &[&str]) -> Vec<Bytes> {
		names.iter().map(|n| Bytes::from(n.to_string())).collect()
	}

	#[rstest]
	#[case(1)]
	#[case(3)]
	#[case(16)]
	fn test_variadic_members_arity(#[case] n: usize) {
		let members: Vec<Arg> = (0..n).map(|i| Arg::from(format!("m{i}"))).collect();
		let cmd = sadd(Bytes::from_static(b"s"), members).unwrap();
		// key + N members, key first.
		assert_eq!(cmd.args.len(), 1 + n);
		assert_eq!(&cmd.args.as_slice()[0][..], b"s");
	}

	#[test]
	fn test_numeric_members_take_canonical_form() {
		let cmd = sadd(
			Bytes::from_static(b"s"),
			vec![Arg::from(7i64), Arg::from(2.5f64), Arg::from("plain")],
		)
		.unwrap();
		let args = cmd.args.into_vec();
		assert_eq!(&args[1][..], b"7");
		assert_eq!(&args[2][..], b"2.5");
		assert_eq!(&args[3][..], b"plain");
	}

	#[test]
	fn test_empty_member_list_is_an_arity_error() {
		assert_eq!(
			sadd(Bytes::from_static(b"s"), vec![]).unwrap_err(),
			EncodeError::Arity("sadd")
		);
	}

	#[test]
	fn test_sintercard_leads_with_numkeys() {
		let cmd = sintercard(keys(&["a", "b", "c"]), Some(2)).unwrap();
		let args = cmd.args.into_vec();
		let expected: Vec<&[u8]> = vec![b"3", b"a", b"b", b"c", b"LIMIT", b"2"];
		assert_eq!(args.len(), expected.len());
		for (arg, want) in args.iter().zip(expected) {
			assert_eq!(&arg[..], want);
		}
	}

	#[test]
	fn test_sintercard_rejects_negative_limit() {
		assert!(matches!(
			sintercard(keys(&["a"]), Some(-1)).unwrap_err(),
			EncodeError::InvalidOption(_, _)
		));
	}

	#[test]
	fn test_spop_count_is_optional() {
		let bare = spop(Bytes::from_static(b"s"), None).unwrap();
		assert_eq!(bare.args.len(), 1);

		let counted = spop(Bytes::from_static(b"s"), Some(2)).unwrap();
		let args = counted.args.into_vec();
		assert_eq!(args.len(), 2);
		assert_eq!(&args[1][..], b"2");
	}

	#[test]
	fn test_store_commands_lead_with_destination() {
		let cmd = sinterstore(Bytes::from_static(b"dst"), keys(&["a", "b"])).unwrap();
		let args = cmd.args.into_vec();
		assert_eq!(&args[0][..], b"dst");
		assert_eq!(args.len(), 3);
		assert_eq!(cmd.shape, ResponseShape::Int);
	}

	#[test]
	fn test_smove_shape() {
		let cmd = smove(
			Bytes::from_static(b"a"),
			Bytes::from_static(b"b"),
			Bytes::from_static(b"m"),
		)
		.unwrap();
		assert_eq!(cmd.shape, ResponseShape::Bool);
		assert_eq!(cmd.args.len(), 3);
	}

	#[test]
	fn test_missing_key_aborts_before_any_side_effect() {
		assert_eq!(scard(Bytes::new()).unwrap_err(), EncodeError::Missing("key"));
	}
}
