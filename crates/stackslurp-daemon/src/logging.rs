use crate::config::LoggingConfig;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Output shape of log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line, event fields flattened to the top level
    Json,
    #[default]
    Pretty,
}

/// `RUST_LOG` first, then the configured level, then `info`
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Call once, before the first log line.
pub fn init_logging(config: &LoggingConfig) {
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter(&config.level));

    match config.format {
        LogFormat::Json => subscriber.json().flatten_event(true).init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }
}
