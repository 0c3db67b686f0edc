use std::sync::Arc;

use jsonwebtoken::DecodingKey;

use dermscore_storage::DocumentStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub decoding_key: DecodingKey,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, jwt_secret: &str) -> Self {
        Self {
            store,
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}
