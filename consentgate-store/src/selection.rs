//! Fallback cache for the patient's hospital and provider selections.
//!
//! The backend copy is authoritative; this cache only answers when the backend
//! has not been asked yet or could not be reached.

use std::sync::Arc;

use consentgate_core::{HospitalSelection, ProviderSelection};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;
use crate::kv::KeyValueStore;

pub const HOSPITAL_SELECTION_KEY: &str = "consentgate.hospital_selection";
pub const PROVIDER_SELECTION_KEY: &str = "consentgate.provider_selection";

#[derive(Clone)]
pub struct SelectionCache {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SelectionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionCache").finish_non_exhaustive()
    }
}

impl SelectionCache {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Unparseable entries are dropped and read as absent
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding corrupt cached selection");
                self.backend.remove(key)?;
                Ok(None)
            }
        }
    }

    fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw)
    }

    pub fn hospital(&self) -> Result<Option<HospitalSelection>> {
        self.load(HOSPITAL_SELECTION_KEY)
    }

    pub fn set_hospital(&self, selection: &HospitalSelection) -> Result<()> {
        self.store(HOSPITAL_SELECTION_KEY, selection)
    }

    pub fn clear_hospital(&self) -> Result<()> {
        self.backend.remove(HOSPITAL_SELECTION_KEY)
    }

    pub fn provider(&self) -> Result<Option<ProviderSelection>> {
        self.load(PROVIDER_SELECTION_KEY)
    }

    pub fn set_provider(&self, selection: &ProviderSelection) -> Result<()> {
        self.store(PROVIDER_SELECTION_KEY, selection)
    }

    pub fn clear_provider(&self) -> Result<()> {
        self.backend.remove(PROVIDER_SELECTION_KEY)
    }
}
