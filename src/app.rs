use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{auth, catalog, contact, favorites, import, profile};

pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(catalog::router())
                .merge(profile::router())
                .merge(favorites::router())
                .merge(contact::router())
                .merge(import::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>, latency: Duration, span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        let latency_ms = latency.as_millis() as u64;
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms, "response");
                        } else {
                            tracing::info!(%status, latency_ms, "response");
                        }
                    },
                ),
        )
}

/// Single configured origin when `CORS_ALLOW_ORIGIN` is set, permissive otherwise.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = config.cors_allow_origin.as_deref().and_then(|o| {
        o.parse::<HeaderValue>()
            .map_err(|e| tracing::warn!(origin = o, error = %e, "ignoring invalid CORS origin"))
            .ok()
    });

    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
            .expose_headers([header::CONTENT_LENGTH])
            .allow_credentials(true)
            .max_age(Duration::from_secs(12 * 60 * 60)),
        None => CorsLayer::permissive(),
    }
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtKeys;
    use crate::config::JwtConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let app = build_app(AppState::fake());
        let res = app.oneshot(request).await.expect("router is infallible");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn bearer(state: &AppState, user_id: i64) -> String {
        format!("Bearer {}", state.jwt.issue(user_id).expect("issue"))
    }

    fn multipart(field: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--BOUNDARY\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"book.xlsx\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n--BOUNDARY--\r\n");

        let state = AppState::fake();
        Request::builder()
            .method("POST")
            .uri("/api/import")
            .header(header::AUTHORIZATION, bearer(&state, 1))
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        for (method, uri) in [
            ("GET", "/api/me"),
            ("GET", "/api/profile"),
            ("PUT", "/api/profile"),
            ("GET", "/api/favorites"),
            ("POST", "/api/favorites/1"),
            ("POST", "/api/import"),
        ] {
            let (status, body) = send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["error"], "Missing Authorization header", "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn token_without_bearer_prefix_is_rejected() {
        let state = AppState::fake();
        let token = state.jwt.issue(1).unwrap();
        let (status, body) = send(
            Request::builder()
                .uri("/api/profile")
                .header(header::AUTHORIZATION, token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Malformed token");
    }

    #[tokio::test]
    async fn token_from_another_secret_is_rejected() {
        let foreign = JwtKeys::new(&JwtConfig::with_secret("someone-else"));
        let (status, body) = send(
            Request::builder()
                .uri("/api/favorites")
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", foreign.issue(1).unwrap()),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token signature");
    }

    #[tokio::test]
    async fn register_validates_before_touching_database() {
        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"username":"cook","email":"not-an-email","password":"secret1"}"#,
                ))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email");
    }

    #[tokio::test]
    async fn register_with_missing_field_is_a_json_bad_request() {
        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"a@b.co","password":"secret1"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap_or_default().contains("username"));
    }

    #[tokio::test]
    async fn unparsable_bodies_answer_json_bad_request() {
        for (uri, content_type, payload) in [
            ("/api/register", "application/json", "{}"),
            ("/api/login", "application/json", "not json"),
            ("/api/contact", "text/plain", r#"{"message":"hi"}"#),
        ] {
            let (status, body) = send(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"].is_string(), "{uri}");
        }
    }

    #[tokio::test]
    async fn non_numeric_ids_answer_json_bad_request() {
        let state = AppState::fake();
        for (method, uri) in [("GET", "/api/recipes/soup"), ("POST", "/api/favorites/soup")] {
            let (status, body) = send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::AUTHORIZATION, bearer(&state, 2))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
            assert!(body["error"].is_string(), "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn non_ascii_authorization_header_is_malformed() {
        let (status, body) = send(
            Request::builder()
                .uri("/api/me")
                .header(
                    header::AUTHORIZATION,
                    HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Malformed token");
    }

    #[tokio::test]
    async fn login_rejects_malformed_email() {
        let (status, _) = send(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"email":"nobody","password":"x"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn profile_update_rejects_negative_values() {
        let state = AppState::fake();
        let (status, _) = send(
            Request::builder()
                .method("PUT")
                .uri("/api/profile")
                .header(header::AUTHORIZATION, bearer(&state, 3))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"bmr":-5,"tdee":2000}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn contact_requires_message() {
        let (status, body) = send(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"A","email":"a@b.co","message":"  "}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn import_requires_file_field() {
        let (status, body) = send(multipart("other", b"whatever")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "file is required");
    }

    #[tokio::test]
    async fn import_rejects_unreadable_workbook() {
        let (status, body) = send(multipart("file", b"not a spreadsheet")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Import failed");
        assert!(body["detail"]
            .as_str()
            .unwrap_or_default()
            .starts_with("cannot open workbook"));
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let config = AppConfig {
            cors_allow_origin: Some("http://localhost:5173".into()),
            ..AppConfig::for_tests()
        };
        let state = AppState::from_parts(AppState::fake().db, std::sync::Arc::new(config));
        let res = build_app(state)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/recipes")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("http://localhost:5173")
        );
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|v| v.to_str().ok()),
            Some("true")
        );
    }
}
