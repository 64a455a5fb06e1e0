//! Token carrier: where the current bearer token lives on the client.
//!
//! At most one token is resident per key. Writes are last-writer-wins and
//! clearing is idempotent, so concurrent callers need no coordination beyond
//! the store's own lock.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Backend that persists tokens by name.
pub trait TokenStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&self, key: &str, token: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.tokens.read().get(key).cloned())
    }

    fn save(&self, key: &str, token: &str) -> Result<(), StoreError> {
        self.tokens.write().insert(key.to_string(), token.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.tokens.write().remove(key);
        Ok(())
    }
}

/// Stores each token as a file named after its key inside `dir`, so a
/// session survives restarts of the dashboard shell.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key);
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn save(&self, key: &str, token: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path(key);
        std::fs::write(&path, token).map_err(|source| StoreError::Io { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// The single holder of the client's bearer token, under a configured key.
#[derive(Clone)]
pub struct TokenCarrier {
    key: String,
    store: Arc<dyn TokenStore>,
}

impl TokenCarrier {
    pub fn new(key: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            key: key.into(),
            store,
        }
    }

    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(key, Arc::new(MemoryTokenStore::new()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current token, if any.
    ///
    /// A store that cannot be read is treated as holding no token: the
    /// request goes out unauthenticated and the server answers 401.
    pub fn token(&self) -> Option<String> {
        match self.store.load(&self.key) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored token");
                None
            }
        }
    }

    /// Replace the stored token (login).
    pub fn store(&self, token: &str) -> Result<(), StoreError> {
        self.store.save(&self.key, token)
    }

    /// Drop the stored token. Clearing an empty carrier is a no-op.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)
    }
}

impl core::fmt::Debug for TokenCarrier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenCarrier").field("key", &self.key).finish_non_exhaustive()
    }
}
