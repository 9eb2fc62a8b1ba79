//! Client configuration resolved at boot.
//!
//! Values come from a key lookup: the process environment on native targets,
//! build-time constants in the browser. The host the client was reached
//! through participates in base-URL and mode resolution.

use core::str::FromStr;
use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FrontdeskError;

pub const ENV_APP_MODE: &str = "FRONTDESK_APP_MODE";
pub const ENV_API_BASE_URL: &str = "FRONTDESK_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_MS: &str = "FRONTDESK_HTTP_TIMEOUT_MS";

const DEFAULT_API_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Deployment flavour of the client build.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    /// Front-desk machine: every role may log in.
    #[default]
    Server,
    /// Guest terminal: only the guest role.
    Client,
}

impl FromStr for AppMode {
    type Err = FrontdeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(AppMode::Server),
            "client" => Ok(AppMode::Client),
            other => Err(FrontdeskError::config(format!("unknown app mode '{other}'"))),
        }
    }
}

/// Fully resolved client configuration for one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub mode: AppMode,
    /// Host name the client was reached through (`window.location.hostname`).
    pub host: String,
    pub api_base_url: String,
    pub http_timeout: Duration,
}

impl ClientConfig {
    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// Unusable values are logged and replaced by their defaults; resolution
    /// itself never fails.
    pub fn from_lookup<F>(lookup: F, host: impl Into<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = host.into();

        let mode = match lookup(ENV_APP_MODE) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "falling back to server mode");
                AppMode::Server
            }),
            None => AppMode::Server,
        };

        let api_base_url = lookup(ENV_API_BASE_URL)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| default_base_url(&host));

        let http_timeout = match lookup(ENV_HTTP_TIMEOUT_MS) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid http timeout");
                    DEFAULT_HTTP_TIMEOUT
                }
            },
            None => DEFAULT_HTTP_TIMEOUT,
        };

        Self {
            mode,
            host,
            api_base_url,
            http_timeout,
        }
    }

    /// Resolve configuration from the process environment.
    pub fn from_env(host: impl Into<String>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), host)
    }

    /// Whether the client was reached through a loopback host.
    pub fn is_local_access(&self) -> bool {
        is_loopback_host(&self.host)
    }
}

/// `localhost` or any loopback IP literal (`127.0.0.0/8`, `::1`).
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    host.parse::<IpAddr>().map(|ip| ip.is_loopback()).unwrap_or(false)
}

/// Remote hosts talk to the API on the same machine that served the client.
fn default_base_url(host: &str) -> String {
    if host.is_empty() || is_loopback_host(host) {
        format!("http://localhost:{DEFAULT_API_PORT}/api")
    } else {
        format!("http://{host}:{DEFAULT_API_PORT}/api")
    }
}
