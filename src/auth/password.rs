//! Password digests using SHA-256 over a process-wide salt
//!
//! The digest is deterministic: login recomputes it from the submitted
//! plaintext and compares it with the stored value. There is no stored
//! per-user salt to look up first.

use crate::config::AppConfig;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};

/// Credential hasher bound to the configured salt
pub struct CredentialHasher {
    salt: Secret<String>,
}

impl CredentialHasher {
    pub fn new(salt: Secret<String>) -> Self {
        Self { salt }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.security.password_salt.clone())
    }

    /// Hash a password into a 64-char lowercase hex digest
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.expose_secret().as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check a password against a stored digest
    pub fn matches(&self, password: &str, digest: &str) -> bool {
        let computed = self.hash(password);
        if computed.len() != digest.len() {
            return false;
        }

        // Constant-time over the digest length
        computed
            .bytes()
            .zip(digest.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
