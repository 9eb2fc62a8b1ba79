//! Browser bindings: `window.sessionStorage` and build-time configuration.

use frontdesk_auth::{SessionStorage, StorageError};
use frontdesk_core::ClientConfig;
use frontdesk_core::config::{ENV_API_BASE_URL, ENV_APP_MODE, ENV_HTTP_TIMEOUT_MS};
use web_sys::window;

/// `window.sessionStorage`: one partition per tab, kept across reloads.
#[derive(Debug, Copy, Clone, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window = window().ok_or_else(|| StorageError::Unavailable("no window object".to_string()))?;
        window
            .session_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage is disabled".to_string()))
    }
}

impl SessionStorage for BrowserSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// Host name the page was served from.
pub fn current_host() -> String {
    window()
        .and_then(|w| w.location().hostname().ok())
        .unwrap_or_default()
}

/// Configuration baked in at build time, resolved against the current host.
pub fn config_from_build_env() -> ClientConfig {
    ClientConfig::from_lookup(
        |key| {
            let value = match key {
                ENV_APP_MODE => option_env!("FRONTDESK_APP_MODE"),
                ENV_API_BASE_URL => option_env!("FRONTDESK_API_BASE_URL"),
                ENV_HTTP_TIMEOUT_MS => option_env!("FRONTDESK_HTTP_TIMEOUT_MS"),
                _ => None,
            };
            value.map(str::to_string)
        },
        current_host(),
    )
}
