//! Username/password authentication with signed bearer tokens.
//!
//! Provides:
//! - Credential stores: SQLite-backed for durable deployments, in-memory for
//!   tests and ephemeral use
//! - An [`AuthService`] composing a store, a password hasher, and a token
//!   issuer into `register`/`login`
//! - Opaque bearer tokens: serde-serialized claims signed with HMAC-SHA256,
//!   valid for a bounded window (10 hours by default)
//!
//! ## Design Decisions
//! - No external JWT dependency: tokens are base64url claims plus an
//!   HMAC-SHA256 signature, validated in constant time.
//! - Password hashing uses iterated SHA-256 (100k rounds) + per-account salt,
//!   with the salt embedded in the digest string.
//! - Collaborators are passed explicitly as trait objects; there is no
//!   framework wiring and no global state.

pub mod account;
pub mod config;
pub mod error;
pub mod hasher;
pub mod service;
pub mod store;
pub mod token;

pub use account::{Account, NewAccount};
pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, StoreError};
pub use hasher::{PasswordHasher, SaltedSha256Hasher};
pub use service::AuthService;
pub use store::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
pub use token::{Claims, TokenIssuer};
