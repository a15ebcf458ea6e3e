//! Opaque signed bearer tokens.
//!
//! A token is `base64url(claims_json) "." base64url(hmac_sha256)`, with the
//! MAC computed over the encoded claims segment. No external JWT dependency:
//! validation recomputes the MAC in constant time, then checks the subject
//! and expiry. Any failure collapses to
//! [`AuthError::InvalidOrExpiredToken`] so callers cannot tell a forged
//! token from a stale one.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Signing key length (32 bytes / 256 bits).
pub const KEY_BYTES: usize = 32;

/// Default token validity window: 10 hours (seconds).
pub(crate) const DEFAULT_TOKEN_TTL_SECS: u64 = 10 * 3600;

/// Claims carried by a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username the token was issued to.
    pub sub: String,
    /// Unix timestamp of issuance.
    pub iat: i64,
    /// Unix timestamp after which the token is rejected.
    pub exp: i64,
}

/// Issues and validates HMAC-SHA256 signed bearer tokens.
pub struct TokenIssuer {
    key: [u8; KEY_BYTES],
    ttl_secs: u64,
}

impl TokenIssuer {
    /// Create an issuer with a 256-bit signing key and the default validity
    /// window.
    pub fn new(key: [u8; KEY_BYTES]) -> Self {
        Self::with_ttl(key, DEFAULT_TOKEN_TTL_SECS)
    }

    /// Create an issuer with a custom validity window in seconds. The window
    /// is clamped to at least one second so `exp` is always after `iat`.
    pub fn with_ttl(key: [u8; KEY_BYTES], ttl_secs: u64) -> Self {
        Self {
            key,
            ttl_secs: ttl_secs.max(1),
        }
    }

    /// Generate a random signing key and save it to a file.
    pub fn generate_key_file(path: &Path) -> Result<[u8; KEY_BYTES], AuthError> {
        let mut key = [0u8; KEY_BYTES];
        rand::rngs::OsRng.fill_bytes(&mut key);
        std::fs::write(path, key)
            .map_err(|e| AuthError::InvalidSigningKey(format!("failed to write key file: {e}")))?;
        tracing::info!(path = %path.display(), "token signing key generated");
        Ok(key)
    }

    /// Load a signing key previously written by [`Self::generate_key_file`].
    pub fn load_key_file(path: &Path) -> Result<[u8; KEY_BYTES], AuthError> {
        let bytes = std::fs::read(path)
            .map_err(|e| AuthError::InvalidSigningKey(format!("failed to read key file: {e}")))?;
        if bytes.len() != KEY_BYTES {
            return Err(AuthError::InvalidSigningKey(format!(
                "key must be exactly {KEY_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let mut key = [0u8; KEY_BYTES];
        key.copy_from_slice(&bytes);
        Ok(key)
    }

    /// Issue a signed token for the given subject, valid from now until the
    /// end of the validity window.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = now_secs();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl_secs as i64,
        };
        self.sign(&claims)
    }

    /// Validate a token: signature integrity, subject match, and expiry.
    /// Returns the embedded claims on success.
    pub fn validate(&self, token: &str, expected_subject: &str) -> Result<Claims, AuthError> {
        self.validate_at(token, expected_subject, now_secs())
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{payload}.{signature}"))
    }

    fn validate_at(
        &self,
        token: &str,
        expected_subject: &str,
        now: i64,
    ) -> Result<Claims, AuthError> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or(AuthError::InvalidOrExpiredToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        // Check the MAC before touching the claims.
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        let claims_json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;
        let claims: Claims = serde_json::from_slice(&claims_json)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        if claims.sub != expected_subject || claims.exp <= now {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        Ok(claims)
    }
}

/// Current Unix epoch in seconds.
fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new([7u8; KEY_BYTES])
    }

    #[test]
    fn issue_and_validate() {
        let issuer = test_issuer();
        let token = issuer.issue("alice").unwrap();

        let claims = issuer.validate(&token, "alice").unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, claims.iat + DEFAULT_TOKEN_TTL_SECS as i64);
    }

    #[test]
    fn wrong_subject_is_rejected() {
        let issuer = test_issuer();
        let token = issuer.issue("alice").unwrap();

        let err = issuer.validate(&token, "bob").unwrap_err();
        assert!(matches!(err, AuthError::InvalidOrExpiredToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::with_ttl([7u8; KEY_BYTES], 60);
        let token = issuer.issue("alice").unwrap();
        let claims = issuer.validate(&token, "alice").unwrap();

        // Valid just before expiry, rejected from the expiry instant on.
        assert!(issuer
            .validate_at(&token, "alice", claims.exp - 1)
            .is_ok());
        let err = issuer
            .validate_at(&token, "alice", claims.exp)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidOrExpiredToken));
    }

    #[test]
    fn exp_is_strictly_after_iat_even_for_zero_ttl() {
        let issuer = TokenIssuer::with_ttl([7u8; KEY_BYTES], 0);
        let token = issuer.issue("alice").unwrap();
        let claims = issuer.validate_at(&token, "alice", 0).unwrap();
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let issuer = test_issuer();
        let token = issuer.issue("alice").unwrap();

        let (_, signature) = token.split_once('.').unwrap();
        let forged_claims = Claims {
            sub: "bob".to_string(),
            iat: now_secs(),
            exp: now_secs() + 3600,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{forged_payload}.{signature}");

        assert!(issuer.validate(&forged, "bob").is_err());
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let issuer = test_issuer();
        let token = issuer.issue("alice").unwrap();

        let (payload, _) = token.split_once('.').unwrap();
        let forged = format!("{payload}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");
        assert!(issuer.validate(&forged, "alice").is_err());
    }

    #[test]
    fn token_from_different_key_is_rejected() {
        let issuer_a = TokenIssuer::new([1u8; KEY_BYTES]);
        let issuer_b = TokenIssuer::new([2u8; KEY_BYTES]);

        let token = issuer_a.issue("alice").unwrap();
        assert!(issuer_a.validate(&token, "alice").is_ok());
        assert!(issuer_b.validate(&token, "alice").is_err());
    }

    #[test]
    fn malformed_token_is_rejected() {
        let issuer = test_issuer();
        for garbage in ["", "no-dot-here", ".", "a.b.c", "!!!.???"] {
            assert!(issuer.validate(garbage, "alice").is_err());
        }
    }

    #[test]
    fn key_file_generate_and_load() {
        let tmp = TempDir::new().unwrap();
        let key_path = tmp.path().join("signing.key");

        let key = TokenIssuer::generate_key_file(&key_path).unwrap();
        let loaded = TokenIssuer::load_key_file(&key_path).unwrap();
        assert_eq!(key, loaded);

        let token = TokenIssuer::new(key).issue("alice").unwrap();
        assert!(TokenIssuer::new(loaded).validate(&token, "alice").is_ok());
    }

    #[test]
    fn load_key_file_rejects_wrong_size() {
        let tmp = TempDir::new().unwrap();
        let key_path = tmp.path().join("short.key");
        std::fs::write(&key_path, [0u8; 16]).unwrap();

        let err = TokenIssuer::load_key_file(&key_path).unwrap_err();
        assert!(matches!(err, AuthError::InvalidSigningKey(_)));
    }
}
