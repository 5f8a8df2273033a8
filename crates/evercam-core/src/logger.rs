//! Logging collaborator injected into the client.
//!
//! The pipeline reports every request, its parameters and its duration, and the
//! interpreter reports every failure, through a [`RequestLogger`]. The default
//! [`NullLogger`] discards everything; [`TracingLogger`] hands lines to
//! `tracing` so they reach whatever subscriber the application installed.

use tracing::Level;

/// Sink for the log lines produced while talking to the API.
///
/// Recording is infallible: an implementation that cannot write a line must
/// drop it rather than fail the request.
#[cfg_attr(test, mockall::automock)]
pub trait RequestLogger: Send + Sync {
    /// Record a single line at the given severity.
    fn record(&self, level: Level, line: &str);
}

/// Logger that discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl RequestLogger for NullLogger {
    fn record(&self, _level: Level, _line: &str) {}
}

/// Logger that emits lines as `tracing` events under the `evercam` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RequestLogger for TracingLogger {
    fn record(&self, level: Level, line: &str) {
        if level == Level::ERROR {
            tracing::error!(target: "evercam", "{line}");
        } else if level == Level::WARN {
            tracing::warn!(target: "evercam", "{line}");
        } else if level == Level::INFO {
            tracing::info!(target: "evercam", "{line}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: "evercam", "{line}");
        } else {
            tracing::trace!(target: "evercam", "{line}");
        }
    }
}
