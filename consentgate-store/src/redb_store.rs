//! ReDB-backed durable key/value storage
//!
//! One table, `client_state`, keyed by the fixed storage keys
//! (`consentgate.token`, `consentgate.hospital_selection`, ...).

use crate::error::Result;
use crate::kv::KeyValueStore;
use redb::{Database, TableDefinition};
use std::path::Path;

const CLIENT_STATE: TableDefinition<&str, &str> = TableDefinition::new("client_state");

/// Survives process restarts the way browser storage survives page loads
pub struct RedbStore {
    db: Database,
}

#[allow(clippy::result_large_err)]
impl RedbStore {
    /// Open the store (create if not exists)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        // Initialize table
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CLIENT_STATE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl KeyValueStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CLIENT_STATE)?;

        match table.get(key)? {
            Some(value) => Ok(Some(value.value().to_string())),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CLIENT_STATE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CLIENT_STATE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbStore::open(dir.path().join("state.redb")).unwrap();

        store.set("consentgate.token", "abc").unwrap();
        assert_eq!(store.get("consentgate.token").unwrap().as_deref(), Some("abc"));

        store.remove("consentgate.token").unwrap();
        assert_eq!(store.get("consentgate.token").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("k", "persisted").unwrap();
        }
        let reopened = RedbStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.redb");
        let store = RedbStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }
}
