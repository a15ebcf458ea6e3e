//! Credential stores.
//!
//! Two interchangeable variants behind the [`CredentialStore`] trait:
//! [`SqliteCredentialStore`] for durable storage, [`MemoryCredentialStore`]
//! for tests and ephemeral deployments.

mod memory;
mod sqlite;

pub use memory::MemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;

use std::time::{SystemTime, UNIX_EPOCH};

use crate::account::{Account, NewAccount};
use crate::error::StoreError;

/// Username → account lookup and unique insertion.
///
/// Implementations match usernames ASCII-case-insensitively on the trimmed
/// form. `insert` fails with [`StoreError::DuplicateUsername`] when the
/// username is already present.
pub trait CredentialStore: Send + Sync {
    /// Look up an account by username. Absence is `Ok(None)`, not an error.
    fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. The store assigns the id and creation timestamp.
    fn insert(&self, account: NewAccount) -> Result<Account, StoreError>;
}

/// Current Unix epoch in seconds.
pub(crate) fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
