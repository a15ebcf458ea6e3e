//! Account records shared by all credential stores.

/// A stored account.
///
/// `password_hash` is an opaque digest produced by a
/// [`PasswordHasher`](crate::hasher::PasswordHasher); the plaintext password
/// is never persisted.
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned opaque identifier.
    pub id: String,
    /// Unique username (trimmed, matched ASCII-case-insensitively).
    pub username: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Salted password digest.
    pub password_hash: String,
    /// Unix timestamp of account creation.
    pub created_at: i64,
}

/// Input to [`CredentialStore::insert`](crate::store::CredentialStore::insert).
///
/// The store assigns the id and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
}
