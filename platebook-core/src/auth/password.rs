//! Credential hashing
//!
//! Passwords are stored as the lowercase hex SHA-256 of the plaintext.
//!
//! **Known weakness:** no salt and no work factor are applied, so equal
//! passwords produce equal digests and the digest is cheap to brute-force.
//! Stored records depend on this exact format; moving to a salted KDF needs
//! a digest version tag and a re-hash on next login.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::auth::constant_time_str_compare;

/// Length of a hex-encoded digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Stored form of a password
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest loaded from storage
    pub fn from_hex(hex: String) -> Self {
        PasswordDigest(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a login attempt against this digest
    pub fn matches(&self, plaintext: &str) -> bool {
        let candidate = hash_password(plaintext);
        constant_time_str_compare(&self.0, &candidate.0)
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Hash a plaintext password
pub fn hash_password(plaintext: &str) -> PasswordDigest {
    let digest = Sha256::digest(plaintext.as_bytes());
    PasswordDigest(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // sha256("password")
        assert_eq!(
            hash_password("password").as_str(),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_digest_shape() {
        for input in ["", "pw1", "a much longer passphrase with spaces", "\u{1f373}"] {
            let digest = hash_password(input);
            assert_eq!(digest.as_str().len(), DIGEST_HEX_LEN);
            assert!(digest
                .as_str()
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_matches() {
        let digest = hash_password("pw1");
        assert!(digest.matches("pw1"));
        assert!(!digest.matches("pw2"));
        assert!(!digest.matches(""));
    }

    #[test]
    fn test_debug_redacts() {
        let digest = hash_password("secret");
        assert_eq!(format!("{:?}", digest), "PasswordDigest(..)");
    }
}
