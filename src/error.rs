//! Error types surfaced by stores, the auth service, and the token issuer.
//!
//! All errors go straight to the caller; nothing is retried internally.

use thiserror::Error;

/// Errors from a credential store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The username is already present in the store.
    #[error("username is already taken")]
    DuplicateUsername,

    /// The underlying storage engine failed.
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),
}

/// Errors surfaced to callers of [`AuthService`](crate::service::AuthService)
/// and [`TokenIssuer`](crate::token::TokenIssuer).
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with a username that is already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Unknown username or wrong password. The two cases are deliberately
    /// indistinguishable to the caller.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Bad signature, wrong subject, or expired token. The cause is
    /// deliberately not distinguished.
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    /// Malformed registration input (empty or overlong fields).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The signing key could not be loaded or has the wrong size.
    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),

    /// Credential store failure unrelated to username uniqueness.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Token claims could not be serialized.
    #[error("token encoding failed: {0}")]
    TokenEncoding(#[from] serde_json::Error),
}
