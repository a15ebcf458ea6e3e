//! In-memory credential store.
//!
//! Volatile, process-lifetime storage keyed by username, cleared when the
//! process exits. Keeps a reduced shape: only the password hash and creation
//! time are retained per username. Lookups materialize an [`Account`] with
//! the canonical username doubling as the id and no email.
//!
//! The map sits behind an explicit mutex; concurrent use from multiple
//! threads is safe.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::{now_secs, CredentialStore};
use crate::account::{Account, NewAccount};
use crate::error::StoreError;

/// Per-username credential state.
#[derive(Debug, Clone)]
struct StoredCredential {
    password_hash: String,
    created_at: i64,
}

/// Volatile credential store for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<String, StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Canonical map key: trimmed, ASCII-lowercased username.
    fn key(username: &str) -> String {
        username.trim().to_ascii_lowercase()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let key = Self::key(username);
        let entries = self.entries.lock();
        Ok(entries.get(&key).map(|cred| Account {
            id: key.clone(),
            username: key.clone(),
            email: None,
            password_hash: cred.password_hash.clone(),
            created_at: cred.created_at,
        }))
    }

    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let key = Self::key(&account.username);
        let created_at = now_secs();

        let mut entries = self.entries.lock();
        if entries.contains_key(&key) {
            return Err(StoreError::DuplicateUsername);
        }
        entries.insert(
            key.clone(),
            StoredCredential {
                password_hash: account.password_hash.clone(),
                created_at,
            },
        );

        Ok(Account {
            id: key.clone(),
            username: key,
            email: None,
            password_hash: account.password_hash,
            created_at,
        })
    }
}
