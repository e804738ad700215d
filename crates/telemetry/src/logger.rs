use std::sync::OnceLock;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

/// Errors from logger setup and reconfiguration.
#[derive(Debug, Error)]
pub enum TelemetryError {
	#[error("logger has not been initialized")]
	NotInitialized,

	#[error("invalid log level: {0}")]
	InvalidLogLevel(String),

	#[error("failed to reload log filter: {0}")]
	Reload(String),
}

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now = std::time::SystemTime::now();
		let datetime: chrono::DateTime<chrono::Local> = now.into();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

type ReloadHandle = reload::Handle<EnvFilter, Registry>;

static RELOAD_HANDLE: OnceLock<ReloadHandle> = OnceLock::new();

/// Initialize the logger with the provided log level
///
/// This sets up a console logger with:
/// - The log level from the `level` parameter
/// - Structured output with timestamps in format: YYYY-MM-DD HH:MM:SS.micros
///
/// # Example
///
/// ```no_run
/// telemetry::init("info");
/// log::info!("client ready");
/// ```
pub fn init(level: &str) {
	let env_filter = EnvFilter::new(level);

	let (filter_layer, reload_handle) = reload::Layer::new(env_filter);
	let _ = RELOAD_HANDLE.set(reload_handle);

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(
			fmt::layer()
				.with_timer(CustomTimeFormat)
				.with_target(false)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.init();
}

/// Reload the log level dynamically
///
/// # Errors
///
/// Returns an error if the logger has not been initialized, the provided
/// level is invalid, or the reload itself fails.
pub fn reload_log_level(level: &str) -> Result<(), TelemetryError> {
	const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
	let level_lower = level.to_lowercase();

	if !VALID_LEVELS.contains(&level_lower.as_str()) {
		return Err(TelemetryError::InvalidLogLevel(level.to_string()));
	}

	let handle = RELOAD_HANDLE.get().ok_or(TelemetryError::NotInitialized)?;

	handle
		.reload(EnvFilter::new(level_lower))
		.map_err(|e| TelemetryError::Reload(e.to_string()))
}
