use std::fmt;

/// Every command this binding can issue, as the core identifies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
	// set type
	SAdd,
	SRem,
	SIsMember,
	SMIsMember,
	SMembers,
	SCard,
	SPop,
	SRandMember,
	SMove,
	SInter,
	SInterCard,
	SInterStore,
	SUnion,
	SUnionStore,
	SDiff,
	SDiffStore,
	// incremental iteration
	Scan,
	SScan,
	HScan,
	ZScan,
	// geo type
	GeoAdd,
	GeoDist,
	GeoHash,
	GeoPos,
	GeoSearch,
	GeoSearchStore,
}

impl CommandKind {
	/// Wire-level command name.
	pub fn wire_name(&self) -> &'static str {
		match self {
			CommandKind::SAdd => "SADD",
			CommandKind::SRem => "SREM",
			CommandKind::SIsMember => "SISMEMBER",
			CommandKind::SMIsMember => "SMISMEMBER",
			CommandKind::SMembers => "SMEMBERS",
			CommandKind::SCard => "SCARD",
			CommandKind::SPop => "SPOP",
			CommandKind::SRandMember => "SRANDMEMBER",
			CommandKind::SMove => "SMOVE",
			CommandKind::SInter => "SINTER",
			CommandKind::SInterCard => "SINTERCARD",
			CommandKind::SInterStore => "SINTERSTORE",
			CommandKind::SUnion => "SUNION",
			CommandKind::SUnionStore => "SUNIONSTORE",
			CommandKind::SDiff => "SDIFF",
			CommandKind::SDiffStore => "SDIFFSTORE",
			CommandKind::Scan => "SCAN",
			CommandKind::SScan => "SSCAN",
			CommandKind::HScan => "HSCAN",
			CommandKind::ZScan => "ZSCAN",
			CommandKind::GeoAdd => "GEOADD",
			CommandKind::GeoDist => "GEODIST",
			CommandKind::GeoHash => "GEOHASH",
			CommandKind::GeoPos => "GEOPOS",
			CommandKind::GeoSearch => "GEOSEARCH",
			CommandKind::GeoSearchStore => "GEOSEARCHSTORE",
		}
	}
}

impl fmt::Display for CommandKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.wire_name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_wire_names() {
		assert_eq!(CommandKind::SAdd.wire_name(), "SADD");
		assert_eq!(CommandKind::GeoSearchStore.wire_name(), "GEOSEARCHSTORE");
		assert_eq!(CommandKind::ZScan.to_string(), "ZSCAN");
	}
}
