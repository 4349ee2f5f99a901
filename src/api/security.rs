//! Response hardening and origin checks for the HTTP surface.

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

use crate::error::{AppError, Result};

/// Headers added to every response unless a handler already set them.
///
/// Content-Security-Policy and the cross-origin embedder/resource policies
/// are left out: the API serves JSON to browsers on other origins.
const SECURITY_HEADERS: [(&str, &str); 10] = [
    ("cross-origin-opener-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// Wraps `router` so every response carries the security headers.
pub fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

/// axum middleware rejecting requests that carry no `Origin` header.
///
/// Installed on `/api` in production, where only browser pages on the
/// allowlist are expected to call in.
pub async fn require_origin(request: Request, next: Next) -> Result<Response> {
    if !request.headers().contains_key(header::ORIGIN) {
        warn!("Rejected {} {} without Origin header", request.method(), request.uri());
        return Err(AppError::Forbidden("Origin header required".to_string()));
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
    };
    use tower::util::ServiceExt;

    fn app() -> Router {
        let api = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(require_origin));
        with_security_headers(Router::new().nest("/api", api))
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert!(headers.get("content-security-policy").is_none());
    }

    #[tokio::test]
    async fn test_missing_origin_forbidden() {
        let response = app()
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        // Rejections are hardened too
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    }
}
