//! Persistence boundary: a durable key → bytes store.
//!
//! The engine reads and writes whole collections through [`Store`]; one key per
//! collection per owner, see [`collection_key`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::auth::identity::UserId;

/// All errors a [`Store`] implementation can return.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error on key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be represented by this backend.
    #[error("invalid store key: {0}")]
    InvalidKey(String),

    /// A previous holder of the store lock panicked.
    #[error("store lock poisoned")]
    Poisoned,

    /// The collection under this key could not be read at load time; writing
    /// it now would replace data that was never seen.
    #[error("collection {0} was not loaded; reload before writing")]
    Unavailable(String),
}

/// Durable key-value byte store with read-after-write consistency within a process.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// The per-owner collections the repository persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Moods,
    Assessments,
    Tasks,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Moods => "moods",
            Collection::Assessments => "assessments",
            Collection::Tasks => "tasks",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{prefix}_{collection}_{owner}`, e.g. `mindease_moods_1712345678901`.
pub fn collection_key(prefix: &str, collection: Collection, owner: &UserId) -> String {
    format!("{}_{}_{}", prefix, collection, owner)
}
