//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

pub const ENV_LOG_FORMAT: &str = "FRONTDESK_LOG_FORMAT";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive, e.g. `info,frontdesk_auth=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::Json,
        }
    }
}

impl ObservabilityConfig {
    /// `RUST_LOG` for the filter, `FRONTDESK_LOG_FORMAT` for the format.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            filter: lookup(EnvFilter::DEFAULT_ENV)
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            format: lookup(ENV_LOG_FORMAT)
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
        }
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed.
pub fn init(config: &ObservabilityConfig) -> bool {
    let filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    match config.format {
        LogFormat::Json => builder.json().with_target(false).try_init().is_ok(),
        LogFormat::Pretty => builder.pretty().try_init().is_ok(),
    }
}
