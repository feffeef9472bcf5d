//! Client-local key-value storage and the session store built on top of it.
//!
//! `Storage` plays the part of the browser's local storage: string values under
//! string keys. `SessionStore` narrows it to the single credential slot the
//! request client reads on every request. Tokens are wrapped in
//! `SecretString` as soon as they leave storage and must never be logged.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use thiserror::Error;

/// Key holding the bearer credential.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key-value storage.
pub trait Storage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Single-slot credential store shared by the request client and auth context.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Store backed by process memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Reads the current credential. Empty values count as absent.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be read.
    pub fn get(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(SecretString::from))
    }

    /// Replaces the credential (last write wins).
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be written.
    pub fn set(&self, token: &SecretString) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token.expose_secret())
    }

    /// Removes the credential.
    ///
    /// # Errors
    /// Returns `StorageError` if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)
    }

    /// Underlying key-value storage, used by the auth context for session state.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
