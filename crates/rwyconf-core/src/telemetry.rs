//! Tracing initialisation for binaries hosting the engine.
//!
//! The engine itself only emits events (see [`crate::obs`]); a host calls
//! [`init_tracing`] once at startup to install the global subscriber.
//! Subsequent calls are silently ignored, since the global subscriber can
//! only be set once per process.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Output format for emitted log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines for interactive use.
    Text,
    /// Newline-delimited JSON for log aggregation pipelines.
    Json,
}

/// Install the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is not set; when it is set, the
/// environment filter takes precedence for fine-grained control (e.g.
/// `RUST_LOG=rwyconf_core=debug`).
pub fn init_tracing(format: LogFormat, default_level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().with_target(false).json())
                .try_init()
                .ok();
        }
        LogFormat::Text => {
            registry
                .with(fmt::layer().with_target(false))
                .try_init()
                .ok();
        }
    }
}
