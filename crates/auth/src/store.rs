//! Single source of truth for "who is this tab, if anyone".

use frontdesk_core::Role;

use crate::session::{AUTH_STORAGE_KEY, Identity, PersistedAuthRecord};
use crate::storage::SessionStorage;

/// Session state of one tab.
///
/// Reads (`is_auth`, `current_user`) only look at memory. `check_auth` is the
/// one operation that reconciles memory with the persisted record, so call it
/// before trusting the reads after a fresh load.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<Identity>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Activate `identity`, replacing any prior session, and persist it.
    ///
    /// The identity is trusted as-is. A failed write is logged; the in-memory
    /// session stays active for the rest of this page load.
    pub fn login(&mut self, identity: Identity) {
        let role = identity.role;
        let record = PersistedAuthRecord::authenticated(identity);

        match record.encode() {
            Ok(raw) => {
                if let Err(err) = self.storage.set(AUTH_STORAGE_KEY, &raw) {
                    tracing::error!(%err, %role, "failed to persist session");
                }
            }
            Err(err) => tracing::error!(%err, %role, "failed to encode session"),
        }

        self.current = record.user;
        tracing::info!(%role, "session started");
    }

    /// Clear the session and its persisted record. Idempotent.
    pub fn logout(&mut self) {
        if let Some(previous) = self.current.take() {
            tracing::info!(role = %previous.role, "session ended");
        }
        if let Err(err) = self.storage.remove(AUTH_STORAGE_KEY) {
            tracing::error!(%err, "failed to remove persisted session");
        }
    }

    /// Rehydrate memory from the persisted record and report the result.
    ///
    /// A valid record replaces the in-memory session. A malformed one clears
    /// it. A missing or unreadable record leaves memory as it is, so a login
    /// whose write failed keeps working for the rest of this page load.
    /// Never panics and never hydrates partially.
    pub fn check_auth(&mut self) -> bool {
        let raw = match self.storage.get(AUTH_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.is_auth(),
            Err(err) => {
                tracing::error!(%err, "failed to read persisted session");
                return self.is_auth();
            }
        };

        self.current = match PersistedAuthRecord::decode(&raw) {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(%err, "failed to parse persisted session");
                None
            }
        };

        self.is_auth()
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_auth(&self) -> bool {
        self.current.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|user| user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};
    use proptest::prelude::*;
    use serde_json::Value;

    /// Storage whose writes always fail.
    struct ReadOnlyStorage;

    impl SessionStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    #[test]
    fn fresh_store_is_logged_out() {
        let mut store = SessionStore::new(MemoryStorage::new());
        assert!(!store.is_auth());
        assert!(!store.check_auth());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn login_persists_and_survives_reload() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.login(Identity::new(Role::Manager).with_username("boss"));

        let mut reloaded = SessionStore::new(storage);
        assert!(!reloaded.is_auth());
        assert!(reloaded.check_auth());
        assert_eq!(reloaded.role(), Some(Role::Manager));
        assert_eq!(
            reloaded.current_user().and_then(Identity::username),
            Some("boss")
        );
    }

    #[test]
    fn login_overwrites_previous_session() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.login(Identity::new(Role::Guest).with_attribute("roomId", "101"));
        store.login(Identity::new(Role::Clerk));

        assert!(store.check_auth());
        let user = store.current_user().unwrap();
        assert_eq!(user.role, Role::Clerk);
        assert!(user.attributes().is_empty());
    }

    #[test]
    fn logout_clears_memory_and_record() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.login(Identity::new(Role::Guest));
        store.logout();

        assert!(!store.check_auth());
        assert!(!store.is_auth());
        assert!(store.current_user().is_none());
        assert_eq!(storage.get(AUTH_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn logout_without_session_is_noop() {
        let mut store = SessionStore::new(MemoryStorage::new());
        store.logout();
        store.logout();
        assert!(!store.is_auth());
    }

    #[test]
    fn corrupt_record_is_treated_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(AUTH_STORAGE_KEY, "{not json").unwrap();

        let mut store = SessionStore::new(storage.clone());
        assert!(!store.check_auth());
        assert!(store.current_user().is_none());

        store.login(Identity::new(Role::Clerk));
        let raw = storage.get(AUTH_STORAGE_KEY).unwrap().unwrap();
        let json: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["user"]["role"], "clerk");
    }

    #[test]
    fn corrupt_record_drops_previous_memory_state() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.login(Identity::new(Role::Manager));

        storage
            .set(AUTH_STORAGE_KEY, r#"{"isAuthenticated":true,"user":{"role":"root"}}"#)
            .unwrap();
        assert!(!store.check_auth());
        assert_eq!(store.role(), None);
    }

    #[test]
    fn reads_do_not_touch_storage() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.login(Identity::new(Role::Guest));

        storage
            .set(AUTH_STORAGE_KEY, r#"{"isAuthenticated":false,"user":null}"#)
            .unwrap();
        assert!(store.is_auth());
        assert_eq!(store.role(), Some(Role::Guest));

        assert!(!store.check_auth());
    }

    #[test]
    fn missing_record_leaves_memory_untouched() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(storage.clone());
        store.login(Identity::new(Role::Clerk));

        storage.remove(AUTH_STORAGE_KEY).unwrap();
        assert!(store.check_auth());
        assert_eq!(store.role(), Some(Role::Clerk));
    }

    #[test]
    fn failed_write_keeps_memory_session() {
        let mut store = SessionStore::new(ReadOnlyStorage);
        store.login(Identity::new(Role::Guest).with_username("room-7"));
        assert!(store.is_auth());

        assert!(store.check_auth());
        assert_eq!(store.role(), Some(Role::Guest));
        assert_eq!(
            store.current_user().and_then(Identity::username),
            Some("room-7")
        );

        store.logout();
        assert!(!store.is_auth());
        assert!(!store.check_auth());
    }

    fn arb_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[ -~]{0,16}".prop_map(Value::from),
            prop::collection::vec(any::<u32>(), 0..3).prop_map(Value::from),
        ]
    }

    fn arb_key() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("username".to_string()),
            Just("userId".to_string()),
            Just("role".to_string()),
            "[a-zA-Z_]{1,10}",
        ]
    }

    fn arb_identity() -> impl Strategy<Value = Identity> {
        (
            arb_role(),
            prop::collection::btree_map(arb_key(), arb_value(), 0..5),
        )
            .prop_map(|(role, attrs)| {
                attrs
                    .into_iter()
                    .fold(Identity::new(role), |identity, (k, v)| {
                        identity.with_attribute(k, v)
                    })
            })
    }

    proptest! {
        #[test]
        fn login_then_check_auth_restores_identity(user in arb_identity()) {
            let storage = MemoryStorage::new();
            let mut store = SessionStore::new(storage.clone());
            store.login(user.clone());
            prop_assert!(store.check_auth());
            prop_assert_eq!(store.current_user(), Some(&user));

            let mut reloaded = SessionStore::new(storage);
            prop_assert!(reloaded.check_auth());
            prop_assert_eq!(reloaded.current_user(), Some(&user));
        }

        #[test]
        fn logout_then_check_auth_is_logged_out(user in arb_identity()) {
            let mut store = SessionStore::new(MemoryStorage::new());
            store.login(user);
            store.logout();
            prop_assert!(!store.check_auth());
            prop_assert!(!store.is_auth());
            prop_assert!(store.current_user().is_none());
        }

        #[test]
        fn arbitrary_stored_text_never_panics(raw in ".{0,64}") {
            let storage = MemoryStorage::new();
            storage.set(AUTH_STORAGE_KEY, &raw).unwrap();
            let mut store = SessionStore::new(storage);
            let authed = store.check_auth();
            prop_assert_eq!(authed, store.current_user().is_some());
        }
    }
}
