use crate::auth::AuthContext;
use crate::client::{ApiClient, ClientConfig};
use crate::storage::{FileStorage, SessionStore};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_base_url: String,
    pub storage_path: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_base_url: String, storage_path: PathBuf) -> Self {
        Self {
            api_base_url,
            storage_path,
        }
    }

    /// Session store backed by the storage file.
    #[must_use]
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(Arc::new(FileStorage::new(&self.storage_path)))
    }

    #[must_use]
    pub fn auth(&self) -> AuthContext {
        AuthContext::new(self.session_store())
    }

    /// Request client reading its credential from `store`.
    ///
    /// # Errors
    /// Returns an error if the API base URL is invalid.
    pub fn client(&self, store: SessionStore) -> Result<ApiClient> {
        ApiClient::new(&ClientConfig::new(&self.api_base_url), store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "http://localhost:5000/api".to_string(),
            PathBuf::from("/tmp/eventbook.json"),
        );
        assert_eq!(args.api_base_url, "http://localhost:5000/api");
        assert_eq!(args.storage_path, PathBuf::from("/tmp/eventbook.json"));
        assert!(args.client(SessionStore::in_memory()).is_ok());
    }

    #[test]
    fn test_invalid_api_url() {
        let args = GlobalArgs::new("::nope::".to_string(), PathBuf::from("unused.json"));
        assert!(args.client(SessionStore::in_memory()).is_err());
    }
}
