//! Password hashing.
//!
//! [`SaltedSha256Hasher`] stretches passwords with iterated SHA-256 and a
//! per-call random salt. The digest embeds its salt
//! (`<salt_hex>$<hash_hex>`) so verification needs no extra storage, and
//! comparison is constant-time.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Salt byte length (16 bytes = 32 hex chars).
const SALT_BYTES: usize = 16;

/// Separator between the salt and hash segments of a digest.
const DIGEST_SEPARATOR: char = '$';

/// Default number of SHA-256 iterations for password stretching.
pub(crate) const DEFAULT_HASH_ITERATIONS: u32 = 100_000;

/// One-way salted password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into an opaque digest.
    fn hash(&self, plain: &str) -> String;

    /// Verify a plaintext password against a stored digest.
    fn verify(&self, plain: &str, digest: &str) -> bool;
}

/// Iterated SHA-256 hasher with a fresh random salt per digest.
pub struct SaltedSha256Hasher {
    iterations: u32,
}

impl SaltedSha256Hasher {
    /// Create a hasher with the default iteration count.
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_HASH_ITERATIONS,
        }
    }

    /// Create a hasher with a custom iteration count. Values below 1 are
    /// clamped; lower counts keep test suites fast.
    pub fn with_iterations(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Stretch a password with the given salt using iterated SHA-256.
    fn stretch(&self, password: &str, salt: &str) -> String {
        let mut hash = Sha256::new();
        hash.update(salt.as_bytes());
        hash.update(password.as_bytes());
        let mut result = hash.finalize();

        for _ in 1..self.iterations {
            let mut h = Sha256::new();
            h.update(result);
            h.update(salt.as_bytes());
            result = h.finalize();
        }

        hex::encode(result)
    }
}

impl Default for SaltedSha256Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, plain: &str) -> String {
        let salt = generate_salt();
        let hash = self.stretch(plain, &salt);
        format!("{salt}{DIGEST_SEPARATOR}{hash}")
    }

    fn verify(&self, plain: &str, digest: &str) -> bool {
        let Some((salt, stored)) = digest.split_once(DIGEST_SEPARATOR) else {
            return false;
        };
        let attempt = self.stretch(plain, salt);
        constant_time_eq(stored.as_bytes(), attempt.as_bytes())
    }
}

/// Generate a random salt (hex-encoded).
fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
