//! Demo login gate.
//!
//! Stores a single username/password pair in local storage and compares a
//! login attempt against it. This gates navigation in the demo only: the
//! password is kept in plain text and nothing is sent to the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::View;
use crate::storage::{LocalStorage, StorageError};

/// Storage key holding the registered pair.
pub const CREDENTIALS_KEY: &str = "credentials";

/// Errors returned by the login gate.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Username and password are required")]
    MissingField,

    #[error("No user registered yet")]
    NotRegistered,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Serialize, Deserialize)]
struct Credentials {
    username: String,
    password: String,
}

/// Register/login against the pair held in local storage.
pub struct LoginGate<'a> {
    storage: &'a mut LocalStorage,
}

impl<'a> LoginGate<'a> {
    #[must_use]
    pub const fn new(storage: &'a mut LocalStorage) -> Self {
        Self { storage }
    }

    /// Store `username`/`password`, replacing any earlier pair.
    ///
    /// Returns the view to show next (the login page).
    ///
    /// # Errors
    ///
    /// Returns `GateError::MissingField` if either value is blank, or
    /// `GateError::Storage` if the pair cannot be saved.
    pub fn register(&mut self, username: &str, password: &str) -> Result<View, GateError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(GateError::MissingField);
        }

        self.storage.set(
            CREDENTIALS_KEY,
            &Credentials {
                username: username.to_owned(),
                password: password.to_owned(),
            },
        )?;

        tracing::debug!(username, "demo user registered");
        Ok(View::Login)
    }

    /// Check `username`/`password` against the stored pair.
    ///
    /// Returns the view to show next (the home page).
    ///
    /// # Errors
    ///
    /// Returns `GateError::NotRegistered` if no pair is stored, or
    /// `GateError::InvalidCredentials` if either value differs.
    pub fn login(&self, username: &str, password: &str) -> Result<View, GateError> {
        let stored = self
            .storage
            .get::<Credentials>(CREDENTIALS_KEY)?
            .ok_or(GateError::NotRegistered)?;

        if stored.username == username.trim() && stored.password == password {
            Ok(View::Home)
        } else {
            Err(GateError::InvalidCredentials)
        }
    }
}
