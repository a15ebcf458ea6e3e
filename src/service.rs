//! Registration and login.
//!
//! [`AuthService`] composes a credential store, a password hasher, and a
//! token issuer. All collaborators are passed in explicitly; the service
//! holds no global state and performs no retries.

use std::sync::Arc;

use crate::account::{Account, NewAccount};
use crate::config::AuthConfig;
use crate::error::{AuthError, StoreError};
use crate::hasher::{PasswordHasher, SaltedSha256Hasher};
use crate::store::CredentialStore;
use crate::token::{Claims, TokenIssuer, KEY_BYTES};

/// Digest verified on the unknown-username login path so lookup misses take
/// about as long as wrong-password failures.
const DUMMY_DIGEST: &str = "00000000000000000000000000000000$\
                            0000000000000000000000000000000000000000000000000000000000000000";

/// Username/password authentication over a pluggable credential store.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
    max_username_len: usize,
}

impl AuthService {
    /// Create a service from explicit collaborators, with the default
    /// username length limit.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            max_username_len: AuthConfig::default().max_username_len,
        }
    }

    /// Build a service from a config using the default hasher and token
    /// issuer with the given signing key.
    pub fn from_config(
        store: Arc<dyn CredentialStore>,
        signing_key: [u8; KEY_BYTES],
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher: Arc::new(SaltedSha256Hasher::with_iterations(config.hash_iterations)),
            tokens: TokenIssuer::with_ttl(signing_key, config.token_ttl_secs),
            max_username_len: config.max_username_len,
        }
    }

    /// Register a new account. Fails with [`AuthError::UserAlreadyExists`]
    /// when the username is taken, and [`AuthError::InvalidInput`] for empty
    /// or overlong fields.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<Account, AuthError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(AuthError::InvalidInput("username cannot be empty".into()));
        }
        if trimmed.len() > self.max_username_len {
            return Err(AuthError::InvalidInput(format!(
                "username too long (max {} characters)",
                self.max_username_len
            )));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password cannot be empty".into()));
        }

        if self.store.find_by_username(trimmed)?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let account = NewAccount {
            username: trimmed.to_string(),
            email: email.map(str::to_string),
            password_hash: self.hasher.hash(password),
        };

        match self.store.insert(account) {
            Ok(created) => {
                tracing::info!(username = %created.username, "account registered");
                Ok(created)
            }
            // The pre-check can race a concurrent insert of the same name.
            Err(StoreError::DuplicateUsername) => Err(AuthError::UserAlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    /// Authenticate and return a signed bearer token. Unknown usernames and
    /// wrong passwords both surface as [`AuthError::InvalidCredentials`].
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let account = match self.store.find_by_username(username)? {
            Some(account) => account,
            None => {
                // Burn a verification so a miss costs as much as a mismatch.
                let _ = self.hasher.verify(password, DUMMY_DIGEST);
                tracing::warn!(username = %username.trim(), "login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &account.password_hash) {
            tracing::warn!(username = %account.username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.username)?;
        tracing::debug!(username = %account.username, "login succeeded");
        Ok(token)
    }

    /// Validate a bearer token against the expected subject, returning the
    /// embedded claims.
    pub fn validate_token(
        &self,
        token: &str,
        expected_subject: &str,
    ) -> Result<Claims, AuthError> {
        self.tokens.validate(token, expected_subject)
    }
}
