use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use dermscore_service::{Caller, ServiceError};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims carried by a caller's HS256 token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: u64,
}

/// The caller resolved for a request, if any. Always present in request
/// extensions once `identify_caller` has run.
#[derive(Clone, Debug, Default)]
pub struct CallerIdentity(pub Option<Caller>);

impl CallerIdentity {
    /// The identified caller, or `Unauthenticated`. Handlers call this
    /// before looking at the request body.
    pub fn require(&self) -> Result<&Caller, ApiError> {
        self.0
            .as_ref()
            .ok_or_else(|| ServiceError::Unauthenticated.into())
    }

    pub fn uid(&self) -> Option<&str> {
        self.0.as_ref().map(|c| c.uid.as_str())
    }
}

/// Caller identification middleware.
///
/// Reads `Authorization: Bearer <token>` and verifies the JWT against the
/// configured secret. A missing or invalid token is not rejected here; the
/// request continues unidentified and the operation decides.
pub async fn identify_caller(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let caller = bearer_token(req.headers()).and_then(|token| {
        match decode_caller(token, &state.decoding_key) {
            Ok(caller) => Some(caller),
            Err(e) => {
                tracing::warn!(error = %e, "rejected bearer token");
                None
            }
        }
    });

    req.extensions_mut().insert(CallerIdentity(caller));
    next.run(req).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verify `token` and turn its claims into a caller.
pub fn decode_caller(
    token: &str,
    key: &DecodingKey,
) -> Result<Caller, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let claims = decode::<Claims>(token, key, &validation)?.claims;

    if claims.sub.trim().is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    Ok(if claims.admin {
        Caller::admin(claims.sub)
    } else {
        Caller::new(claims.sub)
    })
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{EncodingKey, Header, encode};

    use super::*;

    fn token(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: &str, admin: bool) -> Claims {
        Claims {
            sub: sub.to_string(),
            admin,
            exp: 4_102_444_800, // 2100-01-01
        }
    }

    #[test]
    fn valid_token_yields_caller() {
        let key = DecodingKey::from_secret(b"secret");
        let caller = decode_caller(&token("secret", &claims("u1", false)), &key).unwrap();
        assert_eq!(caller, Caller::new("u1"));

        let admin = decode_caller(&token("secret", &claims("ops", true)), &key).unwrap();
        assert!(admin.admin);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let key = DecodingKey::from_secret(b"secret");
        assert!(decode_caller(&token("other", &claims("u1", false)), &key).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let key = DecodingKey::from_secret(b"secret");
        let mut expired = claims("u1", false);
        expired.exp = 1_000_000_000;
        assert!(decode_caller(&token("secret", &expired), &key).is_err());
    }

    #[test]
    fn empty_subject_is_rejected() {
        let key = DecodingKey::from_secret(b"secret");
        assert!(decode_caller(&token("secret", &claims("", false)), &key).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Token abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert("authorization", "Bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
