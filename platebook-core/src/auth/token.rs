//! Signed session tokens
//!
//! A token is `base64url(payload) "." base64url(tag)` where the payload is
//! the canonical JSON encoding of [`SessionClaims`] (keys sorted) and the tag
//! is HMAC-SHA256 over the payload bytes under the process-wide secret.
//! Tokens are stateless: validity is decided by the tag and the expiry alone.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use thiserror::Error;

use crate::auth::constant_time_tag_compare;
use crate::{PlatebookError, Result};

type HmacSha256 = Hmac<Sha256>;

/// How long an issued token stays valid
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Why a request could not be authenticated
///
/// The variants are kept apart for logging; the HTTP boundary reports
/// every verifier failure the same way.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("authorization header missing")]
    Missing,

    #[error("token malformed")]
    Malformed,

    #[error("token signature mismatch")]
    BadSignature,

    #[error("token expired")]
    Expired,
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

impl SessionClaims {
    fn canonical_bytes(&self) -> Vec<u8> {
        // serde_json::Value keeps object keys sorted
        json!({ "username": self.username, "exp": self.exp })
            .to_string()
            .into_bytes()
    }
}

/// HMAC key shared by the issuer and the verifier
///
/// Built once at startup and never rotated while the process runs.
#[derive(Clone)]
pub struct SigningKey {
    mac: HmacSha256,
}

impl SigningKey {
    /// Create a key from secret bytes
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(PlatebookError::InvalidSecret("secret is empty".to_string()));
        }

        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| PlatebookError::InvalidSecret(e.to_string()))?;

        Ok(SigningKey { mac })
    }

    /// Generate a random secret, returning the key and its hex form
    pub fn generate() -> Result<(Self, String)> {
        let bytes: [u8; 32] = rand::thread_rng().gen();
        let secret = hex::encode(bytes);
        let key = Self::new(secret.as_bytes())?;
        Ok((key, secret))
    }

    fn tag(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// Issues session tokens
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    key: SigningKey,
}

impl TokenIssuer {
    pub fn new(key: SigningKey) -> Self {
        TokenIssuer { key }
    }

    /// Issue a token for `username`, valid for seven days from now
    pub fn issue(&self, username: &str) -> String {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> String {
        let claims = SessionClaims {
            username: username.to_string(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        let payload = claims.canonical_bytes();
        let tag = self.key.tag(&payload);

        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        )
    }
}

/// Verifies session tokens
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    key: SigningKey,
}

impl TokenVerifier {
    pub fn new(key: SigningKey) -> Self {
        TokenVerifier { key }
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> std::result::Result<String, AuthFailure> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// Checks run in a fixed order: shape, then tag, then claims, then
    /// expiry. A token is still valid at the exact second of its expiry.
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<String, AuthFailure> {
        let (payload_part, tag_part) = token.split_once('.').ok_or(AuthFailure::Malformed)?;

        if payload_part.is_empty() || tag_part.is_empty() || tag_part.contains('.') {
            return Err(AuthFailure::Malformed);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|_| AuthFailure::Malformed)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_part)
            .map_err(|_| AuthFailure::Malformed)?;

        let expected = self.key.tag(&payload);
        if !constant_time_tag_compare(&expected, &tag) {
            return Err(AuthFailure::BadSignature);
        }

        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthFailure::Malformed)?;

        if now.timestamp() > claims.exp {
            return Err(AuthFailure::Expired);
        }

        Ok(claims.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pair(secret: &str) -> (TokenIssuer, TokenVerifier) {
        let key = SigningKey::new(secret.as_bytes()).unwrap();
        (TokenIssuer::new(key.clone()), TokenVerifier::new(key))
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_roundtrip() {
        let (issuer, verifier) = pair("test-secret");
        let token = issuer.issue("alice");
        assert_eq!(verifier.verify(&token).unwrap(), "alice");
    }

    #[test]
    fn test_expiry_boundary() {
        let (issuer, verifier) = pair("test-secret");
        let token = issuer.issue_at("alice", t0());

        let last_valid = t0() + Duration::days(TOKEN_TTL_DAYS);
        assert_eq!(verifier.verify_at(&token, last_valid).unwrap(), "alice");

        let expired = last_valid + Duration::seconds(1);
        assert_eq!(verifier.verify_at(&token, expired), Err(AuthFailure::Expired));
    }

    #[test]
    fn test_flipped_signature_bit() {
        let (issuer, verifier) = pair("test-secret");
        let token = issuer.issue_at("alice", t0());
        let (payload, tag) = token.split_once('.').unwrap();

        let mut tag_bytes = URL_SAFE_NO_PAD.decode(tag).unwrap();
        tag_bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(tag_bytes));

        assert_eq!(verifier.verify_at(&tampered, t0()), Err(AuthFailure::BadSignature));
    }

    #[test]
    fn test_tampered_payload() {
        let (issuer, verifier) = pair("test-secret");
        let token = issuer.issue_at("alice", t0());
        let (_, tag) = token.split_once('.').unwrap();

        let forged = SessionClaims {
            username: "mallory".to_string(),
            exp: i64::MAX,
        };
        let forged_token = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(forged.canonical_bytes()),
            tag
        );

        assert_eq!(verifier.verify_at(&forged_token, t0()), Err(AuthFailure::BadSignature));
    }

    #[test]
    fn test_foreign_secret() {
        let (issuer, _) = pair("secret-one");
        let (_, verifier) = pair("secret-two");
        let token = issuer.issue("alice");
        assert_eq!(verifier.verify(&token), Err(AuthFailure::BadSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let (_, verifier) = pair("test-secret");

        for garbage in ["", "garbage", ".", "abc.", ".abc", "a.b.c", "!!!!.????", "Bearer"] {
            assert_eq!(
                verifier.verify_at(garbage, t0()),
                Err(AuthFailure::Malformed),
                "input {:?}",
                garbage
            );
        }
    }

    #[test]
    fn test_signed_non_claims_payload_is_malformed() {
        let key = SigningKey::new(b"test-secret").unwrap();
        let verifier = TokenVerifier::new(key.clone());

        let payload = b"not json";
        let token = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(payload),
            URL_SAFE_NO_PAD.encode(key.tag(payload))
        );

        assert_eq!(verifier.verify_at(&token, t0()), Err(AuthFailure::Malformed));
    }

    #[test]
    fn test_canonical_payload() {
        let claims = SessionClaims {
            username: "alice".to_string(),
            exp: 42,
        };
        assert_eq!(claims.canonical_bytes(), br#"{"exp":42,"username":"alice"}"#.to_vec());
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(SigningKey::new(b""), Err(PlatebookError::InvalidSecret(_))));
    }

    #[test]
    fn test_generated_secret() {
        let (key, secret) = SigningKey::generate().unwrap();
        assert_eq!(secret.len(), 64);

        let token = TokenIssuer::new(key.clone()).issue("bob");
        let rebuilt = SigningKey::new(secret.as_bytes()).unwrap();
        assert_eq!(TokenVerifier::new(rebuilt).verify(&token).unwrap(), "bob");
    }
}
