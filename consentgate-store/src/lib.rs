pub mod error;
pub mod kv;
pub mod redb_store;
pub mod selection;
pub mod token;

pub use error::{Result, StoreError};
pub use kv::{DetachedStore, KeyValueStore, MemoryStore};
pub use redb_store::RedbStore;
pub use selection::{SelectionCache, HOSPITAL_SELECTION_KEY, PROVIDER_SELECTION_KEY};
pub use token::{TokenStore, TOKEN_KEY};
