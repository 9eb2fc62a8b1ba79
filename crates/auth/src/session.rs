//! Authenticated identity and its persisted form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use frontdesk_core::Role;

/// Storage key of the persisted auth record.
pub const AUTH_STORAGE_KEY: &str = "auth";

const ROLE_KEY: &str = "role";
const USERNAME_KEY: &str = "username";

/// Identity handed over by the login call.
///
/// Only `role` is interpreted here. Every other field the login call returns
/// is kept verbatim, whatever its JSON type, and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub role: Role,

    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Identity {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            attributes: Map::new(),
        }
    }

    pub fn with_username(self, username: impl Into<String>) -> Self {
        self.with_attribute(USERNAME_KEY, username.into())
    }

    /// Attach an opaque field. `role` is owned by [`Identity::role`], so an
    /// attribute under that key is ignored.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != ROLE_KEY {
            self.attributes.insert(key, value.into());
        }
        self
    }

    /// Display name, when the login call supplied one as a string.
    pub fn username(&self) -> Option<&str> {
        self.attributes.get(USERNAME_KEY).and_then(Value::as_str)
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

/// Serialized `{ isAuthenticated, user }` record under [`AUTH_STORAGE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuthRecord {
    pub is_authenticated: bool,
    #[serde(default)]
    pub user: Option<Identity>,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("persisted auth record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("persisted auth record is authenticated but carries no user")]
    MissingUser,
}

impl PersistedAuthRecord {
    pub fn authenticated(user: Identity) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored record into the identity it restores, if any.
    ///
    /// A record flagged unauthenticated restores nothing, even if it still
    /// carries a user.
    pub fn decode(raw: &str) -> Result<Option<Identity>, RecordError> {
        let record: PersistedAuthRecord = serde_json::from_str(raw)?;
        match (record.is_authenticated, record.user) {
            (true, Some(user)) => Ok(Some(user)),
            (true, None) => Err(RecordError::MissingUser),
            (false, _) => Ok(None),
        }
    }
}
