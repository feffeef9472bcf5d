//! Authentication context. It owns the current user state and is the only
//! writer of the stored credential. The session payload returned by the login
//! endpoint is opaque apart from its `token` field; everything else is kept as
//! the user value. State is hydrated from storage on construction so a session
//! survives restarts, and only the token ever reaches the request client.

use crate::storage::{SessionStore, StorageError};
use secrecy::SecretString;
use serde_json::{Map, Value};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, warn};

/// Key holding the serialized user value.
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Session payload is missing a token")]
    MissingToken,
    #[error("Failed to save session: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct AuthContext {
    store: SessionStore,
    user: Arc<RwLock<Option<Value>>>,
}

impl AuthContext {
    /// Builds a context and hydrates the user from storage. Unreadable
    /// storage is treated as signed out.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let user = hydrate(&store).unwrap_or_else(|err| {
            warn!("ignoring stored session: {err}");
            None
        });

        Self {
            store,
            user: Arc::new(RwLock::new(user)),
        }
    }

    /// Current user, `None` when signed out.
    #[must_use]
    pub fn user(&self) -> Option<Value> {
        self.user.read().ok().and_then(|user| user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Persists the credential and user from a session payload.
    ///
    /// The user is the payload's `user` field, or the payload without its
    /// `token` when there is no such field.
    ///
    /// # Errors
    /// Returns `AuthError::MissingToken` if the payload has no non-empty
    /// `token`, or a storage error if the session cannot be saved.
    pub fn login(&self, payload: Value) -> Result<Value, AuthError> {
        let token = payload
            .get("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or(AuthError::MissingToken)?;

        let user = match payload {
            Value::Object(mut fields) => match fields.remove("user") {
                Some(user) if !user.is_null() => user,
                _ => {
                    fields.remove("token");
                    Value::Object(fields)
                }
            },
            _ => Value::Object(Map::new()),
        };

        // the token marks a session, so it is written last
        self.store
            .storage()
            .set_item(USER_KEY, &serde_json::to_string(&user)?)?;
        if let Err(err) = self.store.set(&SecretString::from(token)) {
            if let Err(cleanup) = self.store.storage().remove_item(USER_KEY) {
                warn!("failed to remove partial session: {cleanup}");
            }
            return Err(err.into());
        }

        if let Ok(mut current) = self.user.write() {
            *current = Some(user.clone());
        }
        debug!("session stored");

        Ok(user)
    }

    /// Clears the credential and user.
    ///
    /// # Errors
    /// Returns a storage error if the session cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.store.storage().remove_item(USER_KEY)?;

        if let Ok(mut current) = self.user.write() {
            *current = None;
        }
        debug!("session cleared");

        Ok(())
    }
}

fn hydrate(store: &SessionStore) -> Result<Option<Value>, AuthError> {
    if store.get()?.is_none() {
        return Ok(None);
    }

    let user = match store.storage().get_item(USER_KEY)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Value::Object(Map::new()),
    };

    Ok(Some(user))
}
