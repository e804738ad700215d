use std::time::Duration;

/// COUNT hint sent with scan steps when the caller does not pick one.
pub const DEFAULT_SCAN_COUNT: i64 = 10;

/// Client-side knobs.
///
/// The address and timeout are carried to the engine when the concrete core
/// is constructed; the binding itself only consumes `scan_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
	pub addr: String,
	pub request_timeout: Duration,
	pub scan_count: i64,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			addr: "127.0.0.1:6379".to_string(),
			request_timeout: Duration::from_millis(250),
			scan_count: DEFAULT_SCAN_COUNT,
		}
	}
}

impl ClientConfig {
	pub fn with_addr(mut self, addr: impl Into<String>) -> Self {
		self.addr = addr.into();
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn with_scan_count(mut self, count: i64) -> Self {
		self.scan_count = count;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = ClientConfig::default();
		assert_eq!(config.addr, "127.0.0.1:6379");
		assert_eq!(config.scan_count, 10);
	}

	#[test]
	fn test_builder_chain() {
		let config = ClientConfig::default()
			.with_addr("10.0.0.1:7000")
			.with_scan_count(500);
		assert_eq!(config.addr, "10.0.0.1:7000");
		assert_eq!(config.scan_count, 500);
	}
}
