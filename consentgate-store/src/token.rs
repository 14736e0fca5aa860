use std::sync::Arc;

use crate::kv::{DetachedStore, KeyValueStore, MemoryStore};

/// Fixed storage key of the bearer credential
pub const TOKEN_KEY: &str = "consentgate.token";

/// Single-slot holder of the bearer token.
///
/// Storage failures are logged and otherwise ignored: `get_token` reports
/// "no token" and `set_token`/`clear_token` do nothing. `clear_token` also
/// tells the caller whether the slot is really empty now.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// A store with no host storage behind it
    pub fn detached() -> Self {
        Self::new(Arc::new(DetachedStore))
    }

    pub fn backend(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.backend)
    }

    pub fn get_token(&self) -> Option<String> {
        match self.backend.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read token");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.backend.set(TOKEN_KEY, token) {
            tracing::warn!(error = %e, "Failed to persist token");
        }
    }

    /// Returns false when the backend refused the removal
    pub fn clear_token(&self) -> bool {
        match self.backend.remove(TOKEN_KEY) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear token");
                false
            }
        }
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_token", &self.get_token().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StoreError};

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StoreError::Other("disk gone".to_string()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::Other("disk gone".to_string()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(StoreError::Other("disk gone".to_string()))
        }
    }

    #[test]
    fn test_set_overwrites_single_slot() {
        let store = TokenStore::in_memory();
        assert_eq!(store.get_token(), None);
        store.set_token("abc");
        store.set_token("def");
        assert_eq!(store.get_token().as_deref(), Some("def"));
        assert!(store.clear_token());
        assert_eq!(store.get_token(), None);
    }

    #[test]
    fn test_detached_is_a_no_op() {
        let store = TokenStore::detached();
        store.set_token("abc");
        assert_eq!(store.get_token(), None);
        store.clear_token();
    }

    #[test]
    fn test_backend_errors_never_escape() {
        let store = TokenStore::new(Arc::new(FailingStore));
        store.set_token("abc");
        assert_eq!(store.get_token(), None);
        assert!(!store.clear_token());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let store = TokenStore::in_memory();
        let other = store.clone();
        store.set_token("abc");
        assert_eq!(other.get_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_debug_does_not_print_token() {
        let store = TokenStore::in_memory();
        store.set_token("secret-token");
        assert!(!format!("{:?}", store).contains("secret-token"));
    }
}
