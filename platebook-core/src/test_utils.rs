//! Fixtures shared by unit and integration tests

use chrono::{DateTime, TimeZone, Utc};

use crate::auth::{hash_password, SigningKey, TokenIssuer, TokenVerifier};
use crate::{Identity, Ingredient, RecipeDraft};

/// Secret used by every test signer
pub const TEST_SECRET: &[u8] = b"platebook-test-secret";

/// A fixed point in time for clock-sensitive assertions
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
        .single()
        .unwrap_or_default()
}

pub fn test_signing_key() -> SigningKey {
    SigningKey::new(TEST_SECRET).expect("test secret is non-empty")
}

pub fn test_token_pair() -> (TokenIssuer, TokenVerifier) {
    let key = test_signing_key();
    (TokenIssuer::new(key.clone()), TokenVerifier::new(key))
}

pub fn sample_identity(username: &str, email: &str, password: &str) -> Identity {
    Identity::new(username, email, hash_password(password)).with_created_at(fixed_now())
}

pub fn sample_draft(name: &str) -> RecipeDraft {
    RecipeDraft {
        name: name.to_string(),
        emoji: "🍲".to_string(),
        time: "30 min".to_string(),
        difficulty: "Medium".to_string(),
        servings: 4,
        total_cost: 5.5,
        ingredients: vec![
            Ingredient::new("Stock", "1 l", 2.5),
            Ingredient::new("Vegetables", "500g", 3.0),
        ],
        instructions: vec!["Simmer".to_string(), "Serve".to_string()],
        user_generated: true,
    }
}
