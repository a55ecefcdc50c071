//! Admin authentication gate.
//!
//! A single shared bearer token (`ADMIN_TOKEN`) marks the one privileged
//! caller; there are no user accounts. Handlers opt in by taking an
//! [`AdminUser`] argument — the extractor rejects with 401 before the
//! handler body runs.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::state::AppState;

/// Proof that the request carried the admin bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser;

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if is_admin(&parts.headers, &state.config.admin_token) {
            Ok(AdminUser)
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

/// GET /api/auth/user
/// Single-admin stub: identifies the bearer-token holder.
pub async fn current_user(_admin: AdminUser) -> Json<Value> {
    Json(json!({
        "id": "admin",
        "email": "admin@example.com"
    }))
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// An empty configured token means the admin API is disabled: nothing matches.
pub fn is_admin(headers: &HeaderMap, admin_token: &str) -> bool {
    if admin_token.is_empty() {
        return false;
    }
    bearer_token(headers) == Some(admin_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with_auth("Bearer s3cret");
        assert_eq!(bearer_token(&headers), Some("s3cret"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let headers = headers_with_auth("Basic s3cret");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_is_admin_matching_token() {
        let headers = headers_with_auth("Bearer s3cret");
        assert!(is_admin(&headers, "s3cret"));
    }

    #[test]
    fn test_is_admin_wrong_token() {
        let headers = headers_with_auth("Bearer nope");
        assert!(!is_admin(&headers, "s3cret"));
    }

    #[test]
    fn test_is_admin_empty_config_disables_gate() {
        let headers = headers_with_auth("Bearer ");
        assert!(!is_admin(&headers, ""));
    }
}
