//! One-way password digests
//!
//! Passwords are reduced to a SHA-512 hex digest before they reach the
//! store. Plaintext never leaves the request handler.

use std::fmt;

use sha2::{Digest, Sha512};

/// Hex-encoded SHA-512 digest of a password
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password.
    pub fn of(plaintext: &str) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(plaintext.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Wrap a digest loaded from the store.
    pub fn from_stored(hex_digest: String) -> Self {
        Self(hex_digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a plaintext candidate against this digest.
    pub fn matches(&self, plaintext: &str) -> bool {
        Self::of(plaintext) == *self
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_sha512_hex() {
        let digest = PasswordDigest::of("abc");
        assert_eq!(digest.as_str().len(), 128);
        assert!(digest.as_str().starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn digest_matches_plaintext() {
        let digest = PasswordDigest::of("hunter2");
        assert!(digest.matches("hunter2"));
        assert!(!digest.matches("hunter3"));
        assert_ne!(digest.as_str(), "hunter2");
    }

    #[test]
    fn debug_hides_digest() {
        let digest = PasswordDigest::of("secret");
        assert_eq!(format!("{:?}", digest), "PasswordDigest(..)");
    }
}
