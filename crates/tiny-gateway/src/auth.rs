use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::error::AppError;
use crate::state::AppState;

const BEARER: &str = "bearer";

/// Bearer-token checks guarding the API.
///
/// An empty token disables the corresponding check.
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct Authorizer {
    #[builder(default, setter(into))]
    read_token: String,
    #[builder(default, setter(into))]
    write_token: String,
    /// Creating an entry with a generated id does not need the write token.
    #[builder(default = false)]
    allow_public_create: bool,
}

impl Authorizer {
    pub fn can_read(&self, headers: &HeaderMap) -> bool {
        matches_token(&self.read_token, headers)
    }

    pub fn can_write(&self, headers: &HeaderMap) -> bool {
        matches_token(&self.write_token, headers)
    }

    pub fn can_create(&self, headers: &HeaderMap, generated_id: bool) -> bool {
        (generated_id && self.allow_public_create) || self.can_write(headers)
    }
}

fn matches_token(expected: &str, headers: &HeaderMap) -> bool {
    expected.is_empty() || bearer_token(headers) == Some(expected)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let scheme = value.get(..BEARER.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER) {
        return None;
    }
    Some(value[BEARER.len()..].trim())
}

/// Extractor that rejects requests lacking the read token.
pub struct ReadAccess;

impl FromRequestParts<AppState> for ReadAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.authorizer().can_read(&parts.headers) {
            return Ok(Self);
        }
        debug!(uri = %parts.uri, "failed to authorize read");
        Err(AppError::Unauthorized)
    }
}

/// Extractor that rejects requests lacking the write token.
pub struct WriteAccess;

impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.authorizer().can_write(&parts.headers) {
            return Ok(Self);
        }
        debug!(uri = %parts.uri, "failed to authorize write");
        Err(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
        headers
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer secret")), Some("secret"));
        assert_eq!(bearer_token(&headers("bearer  secret ")), Some("secret"));
        assert_eq!(bearer_token(&headers("BEARER secret")), Some("secret"));
        assert_eq!(bearer_token(&headers("Basic secret")), None);
        assert_eq!(bearer_token(&headers("Bear")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn empty_tokens_allow_everything() {
        let authorizer = Authorizer::default();

        assert!(authorizer.can_read(&HeaderMap::new()));
        assert!(authorizer.can_write(&HeaderMap::new()));
        assert!(authorizer.can_create(&HeaderMap::new(), false));
    }

    #[test]
    fn tokens_are_enforced() {
        let authorizer = Authorizer::builder()
            .read_token("r")
            .write_token("w")
            .build();

        assert!(!authorizer.can_read(&HeaderMap::new()));
        assert!(authorizer.can_read(&headers("Bearer r")));
        assert!(!authorizer.can_read(&headers("Bearer w")));
        assert!(authorizer.can_write(&headers("Bearer w")));
        assert!(!authorizer.can_write(&headers("Bearer r")));
    }

    #[test]
    fn public_create_only_covers_generated_ids() {
        let authorizer = Authorizer::builder()
            .write_token("w")
            .allow_public_create(true)
            .build();

        assert!(authorizer.can_create(&HeaderMap::new(), true));
        assert!(!authorizer.can_create(&HeaderMap::new(), false));
        assert!(authorizer.can_create(&headers("Bearer w"), false));
    }
}
