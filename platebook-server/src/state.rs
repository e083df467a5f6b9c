//! Shared request state

use platebook_core::auth::{SigningKey, TokenIssuer, TokenVerifier};
use platebook_core::store::Stores;
use std::sync::Arc;

/// Everything a handler needs, shared by every connection
#[derive(Debug)]
pub struct AppState {
    pub stores: Stores,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(stores: Stores, key: SigningKey) -> Arc<Self> {
        Arc::new(AppState {
            stores,
            issuer: TokenIssuer::new(key.clone()),
            verifier: TokenVerifier::new(key),
        })
    }
}
