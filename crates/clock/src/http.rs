//! Time source backed by the API's `GET /auth/time` endpoint.

use std::time::Duration;

use frontdesk_core::ClientConfig;
use serde_json::Value;

use crate::error::TimeSyncError;
use crate::source::TimeSource;

const TIME_PATH: &str = "/auth/time";

/// Fetches the server clock over HTTP.
///
/// The body is a bare JSON number of epoch milliseconds. Round-trip latency is
/// not compensated.
#[derive(Debug, Clone)]
pub struct HttpTimeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTimeSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TimeSyncError> {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TimeSyncError::Network(e.to_string()))?;

        // The fetch API has no per-client timeout.
        #[cfg(target_arch = "wasm32")]
        let client = {
            let _ = timeout;
            reqwest::Client::new()
        };

        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), TIME_PATH),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TimeSyncError> {
        Self::new(&config.api_base_url, config.http_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl TimeSource for HttpTimeSource {
    async fn fetch_millis(&self) -> Result<i64, TimeSyncError> {
        let resp = self.client.get(&self.url).send().await.map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TimeSyncError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let body: Value = resp.json().await.map_err(|e| TimeSyncError::Parse(e.to_string()))?;
        parse_timestamp(&body)
    }
}

fn classify(err: reqwest::Error) -> TimeSyncError {
    if err.is_timeout() {
        TimeSyncError::Timeout
    } else {
        TimeSyncError::Network(err.to_string())
    }
}

/// Integer or float epoch milliseconds; anything else is malformed.
pub(crate) fn parse_timestamp(body: &Value) -> Result<i64, TimeSyncError> {
    if let Some(ms) = body.as_i64() {
        return Ok(ms);
    }
    match body.as_f64() {
        Some(ms) if ms.is_finite() && ms.abs() < i64::MAX as f64 => Ok(ms.round() as i64),
        _ => Err(TimeSyncError::Parse(format!("expected epoch milliseconds, got {body}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joins_base_and_path() {
        let source = HttpTimeSource::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url(), "http://localhost:8080/api/auth/time");
    }

    #[test]
    fn parses_integer_and_float_bodies() {
        assert_eq!(parse_timestamp(&json!(1_700_000_000_123_i64)), Ok(1_700_000_000_123));
        assert_eq!(parse_timestamp(&json!(1_700_000_000_123.6)), Ok(1_700_000_000_124));
    }

    #[test]
    fn rejects_non_numeric_bodies() {
        for body in [json!("1700000000000"), json!(null), json!({"time": 1}), json!([1])] {
            assert!(matches!(parse_timestamp(&body), Err(TimeSyncError::Parse(_))));
        }
    }
}
