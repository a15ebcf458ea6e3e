//! SQLite-backed credential store.
//!
//! Single `accounts` table with a unique, case-insensitive username column.
//! Username uniqueness is enforced by the schema, so a raced insert surfaces
//! as a constraint violation rather than a lost write.

use parking_lot::Mutex;
use std::path::Path;

use super::{now_secs, CredentialStore};
use crate::account::{Account, NewAccount};
use crate::error::StoreError;

/// Durable credential store backed by a single SQLite database.
pub struct SqliteCredentialStore {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteCredentialStore {
    /// Open (or create) the credential database at the given path.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open(db_path)?;

        // WAL mode for concurrent reads + crash safety
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &rusqlite::Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE COLLATE NOCASE,
                email TEXT,
                password_hash TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let conn = self.conn.lock();
        let row = conn.query_row(
            "SELECT id, username, email, password_hash, created_at
             FROM accounts WHERE username = ?1 COLLATE NOCASE",
            rusqlite::params![username.trim()],
            |row| {
                Ok(Account {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    password_hash: row.get(3)?,
                    created_at: row.get(4)?,
                })
            },
        );

        match row {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn insert(&self, account: NewAccount) -> Result<Account, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let username = account.username.trim().to_string();
        let created_at = now_secs();

        let conn = self.conn.lock();
        let result = conn.execute(
            "INSERT INTO accounts (id, username, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                id,
                username,
                account.email,
                account.password_hash,
                created_at
            ],
        );

        match result {
            Ok(_) => Ok(Account {
                id,
                username,
                email: account.email,
                password_hash: account.password_hash,
                created_at,
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }
}
