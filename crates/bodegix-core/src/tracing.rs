use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one object per line. Used by services.
    Json,
    /// Human-readable text. Used by operator tools on a terminal.
    Text,
}

/// Initialize stdout tracing. Call once at startup.
///
/// The filter comes from `RUST_LOG`; `default_directive` applies when it is unset
/// or invalid. Subsequent calls are silently ignored.
pub fn init_tracing(format: LogFormat, default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let registry = tracing_subscriber::registry().with(filter);
    let _ = match format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Text => registry.with(fmt::layer()).try_init(),
    };
}
