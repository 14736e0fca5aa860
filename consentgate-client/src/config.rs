use consentgate_store::{DetachedStore, KeyValueStore, MemoryStore, RedbStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::session::AuthFailureDetection;

/// Backend used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client configuration loaded from YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub registry: RegistrySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    Redb,
    /// No persistence at all; the token never sticks
    Detached,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    pub state_db: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub failure_detection: AuthFailureDetection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Attach the bearer token to registry lookups
    pub authenticated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Redb,
            data_dir: PathBuf::from("data"),
            state_db: "client_state.redb".to_string(),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };

        // Override with environment variables
        if let Ok(base_url) = std::env::var("CONSENTGATE_API_BASE_URL") {
            config.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("CONSENTGATE_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse()
        {
            config.api.timeout_secs = secs;
        }

        if let Ok(data_dir) = std::env::var("CONSENTGATE_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(backend) = std::env::var("CONSENTGATE_STORAGE") {
            config.storage.backend = serde_yaml::from_str(&backend)?;
        }

        Ok(config)
    }

    /// Base URL with trailing slashes removed; the default when blank
    pub fn base_url(&self) -> String {
        let trimmed = self.api.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    /// Get the full path to the client state database
    pub fn state_db_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.state_db)
    }

    /// Open the configured host storage
    pub fn open_storage(&self) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        Ok(match self.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::Redb => Arc::new(RedbStore::open(self.state_db_path())?),
            StorageBackend::Detached => Arc::new(DetachedStore),
        })
    }
}
