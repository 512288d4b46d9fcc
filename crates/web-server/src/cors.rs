//! Cross-origin headers.
//!
//! Every API response is stamped with `Access-Control-Allow-Origin: *`, and
//! each API route answers `OPTIONS` with [`preflight`] instead of running its
//! handler.

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Turns anything response-like (a `Response`, a `(StatusCode, body)` pair,
/// an `Envelope`) into a `Response` that allows any origin.
pub fn finalize(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

/// Empty `200 OK` answer to a browser preflight probe.
pub async fn preflight() -> Response {
    let mut response = finalize(StatusCode::OK);
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// Middleware applying [`finalize`] to every response of the wrapped router.
pub async fn allow_any_origin(request: Request, next: Next) -> Response {
    finalize(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::Envelope;
    use axum::Json;
    use serde_json::json;

    #[test]
    fn finalize_accepts_pairs_and_responses() {
        let response = finalize((StatusCode::BAD_REQUEST, Json(json!({"status": "error"}))));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let response = finalize(Envelope::not_found("x"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn finalize_does_not_duplicate_the_header() {
        let response = finalize(finalize(StatusCode::OK));
        assert_eq!(
            response
                .headers()
                .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn preflight_lists_methods_and_headers() {
        let response = preflight().await;
        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOWED_METHODS);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOWED_HEADERS);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }
}
