//! Logging bootstrap for the session binary.
//!
//! The `log` facade backed by flexi_logger, writing to stderr so the prompt
//! on stdout stays clean. Level resolution: explicit `--log-level`, then the
//! `PUNCHLIST_LOG` environment variable, then "warn".

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

const DEFAULT_LEVEL: &str = "warn";

/// Initialize logging once at startup. The returned handle must be kept
/// alive for the duration of the process.
pub fn init(level: Option<&str>) -> Result<LoggerHandle, FlexiLoggerError> {
    let spec = match level {
        Some(l) => l.to_string(),
        None => std::env::var("PUNCHLIST_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.to_string()),
    };
    Logger::try_with_str(&spec)?.log_to_stderr().start()
}
