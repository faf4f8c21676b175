//! Request authentication and the admin gate.
//!
//! The PSK layer admits trusted callers (the console front end) using a
//! constant-time comparison, then resolves the signed-in user the caller
//! forwards in the `x-user-*` headers. The admin gate sits inside it and
//! admits only users whose record carries the admin role.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::errors::{codes, ErrorDetails, ErrorResponse};
use crate::identity::{CurrentUser, RequestIdentity};
use crate::panels::SessionPanel;
use crate::AppState;

/// Header name for the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Id of the signed-in user, as verified by the identity provider.
pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    mut request: Request,
    next: Next,
) -> Response {
    // If no PSK is configured, allow all requests (dev mode)
    if let Some(expected) = expected_psk {
        if !presents_key(request.headers(), &expected) {
            return unauthorized_response("Missing or invalid API key");
        }
    }

    let identity = RequestIdentity::new(identity_from_headers(request.headers()));
    request.extensions_mut().insert(identity);
    next.run(request).await
}

/// Admit the request only when the caller's user record has the admin role.
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let identity = request
        .extensions()
        .get::<RequestIdentity>()
        .cloned()
        .unwrap_or_else(RequestIdentity::anonymous);

    let panel = SessionPanel::new(state.store.as_ref(), &identity, &state.session_cache);
    match panel.authorize_admin().await {
        Ok(admin) => {
            tracing::debug!("Admin {} admitted to {}", admin.id, request.uri().path());
            next.run(request).await
        }
        Err(err) => {
            tracing::info!("Admin gate rejected {}: {}", request.uri().path(), err);
            err.into_response()
        }
    }
}

/// Check `x-api-key`, falling back to a bearer token.
fn presents_key(headers: &HeaderMap, expected: &str) -> bool {
    if let Some(provided) = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        return constant_time_compare(provided, expected);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .is_some_and(|bearer| constant_time_compare(bearer, expected))
}

/// The forwarded signed-in user, if any. Blank ids count as signed out.
fn identity_from_headers(headers: &HeaderMap) -> Option<CurrentUser> {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    Some(CurrentUser {
        id: text(USER_ID_HEADER)?,
        email: text(USER_EMAIL_HEADER),
        display_name: text(USER_NAME_HEADER),
    })
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: ErrorDetails {
            code: codes::UNAUTHORIZED.to_string(),
            message: message.to_string(),
            details: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_constant_time_compare_empty() {
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("", "not-empty"));
    }

    #[test]
    fn test_identity_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(identity_from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, "  ".parse().unwrap());
        assert!(identity_from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, "uid-1".parse().unwrap());
        headers.insert(USER_EMAIL_HEADER, "a@example.com".parse().unwrap());
        let user = identity_from_headers(&headers).unwrap();
        assert_eq!(user.id, "uid-1");
        assert_eq!(user.email.as_deref(), Some("a@example.com"));
        assert_eq!(user.display_name, None);
    }

    #[test]
    fn test_bearer_token_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(presents_key(&headers, "secret"));
        assert!(!presents_key(&headers, "other"));
    }

    async fn whoami(Extension(identity): Extension<RequestIdentity>) -> String {
        use crate::identity::IdentityGateway;
        identity.actor_id()
    }

    fn guarded(psk: Option<&str>) -> Router {
        let psk = psk.map(str::to_string);
        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn(move |req, next| {
                psk_auth_layer(psk.clone(), req, next)
            }))
    }

    #[tokio::test]
    async fn test_layer_rejects_wrong_key() {
        let response = guarded(Some("secret"))
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(API_KEY_HEADER, "wrong")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_layer_forwards_identity() {
        let response = guarded(None)
            .oneshot(
                HttpRequest::builder()
                    .uri("/whoami")
                    .header(USER_ID_HEADER, "uid-9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"uid-9");
    }
}
