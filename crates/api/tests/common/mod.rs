//! Shared helpers for integration tests.
//!
//! Tests run against the real router (same middleware stack as production)
//! with an in-memory blob store swapped in for S3.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use atelier_api::auth::jwt::{issue_token, JwtConfig};
use atelier_api::catalog::AdminCache;
use atelier_api::config::ServerConfig;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_db::models::image::NewPaintingImage;
use atelier_db::models::painting::{Painting, PaintingFields, PaintingStatus};
use atelier_db::repositories::{PaintingImageRepo, PaintingRepo};
use atelier_storage::MemoryBlobStore;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
        },
    }
}

/// Build the full application router plus a handle to the in-memory blob
/// store backing it, so tests can inspect uploads and simulate failures.
pub fn build_test_app_with_blobs(pool: PgPool) -> (Router, Arc<MemoryBlobStore>) {
    let config = test_config();
    let blobs = Arc::new(MemoryBlobStore::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        blobs: Arc::clone(&blobs) as Arc<dyn atelier_storage::BlobStore>,
        admin_cache: Arc::new(AdminCache::new()),
    };

    (build_app_router(state, &config), blobs)
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_blobs(pool).0
}

/// A Bearer token with the admin role, signed with the test secret.
pub fn admin_token() -> String {
    issue_token(&test_config().jwt, 1, "admin", 15).expect("token")
}

/// A Bearer token with a non-admin role.
pub fn viewer_token() -> String {
    issue_token(&test_config().jwt, 2, "viewer", 15).expect("token")
}

/// Send a GET request with no auth.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a request with a Bearer token and an optional JSON body.
pub async fn send_auth(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    json_body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"));
    let body = match json_body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a multipart body carrying the `painting` JSON part plus the given
/// file parts (part name, file name, bytes).
pub fn multipart_body(
    painting: &serde_json::Value,
    files: &[(&str, &str, &[u8])],
) -> (String, Body) {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"painting\"\r\n\
          Content-Type: application/json\r\n\r\n",
    );
    body.extend_from_slice(painting.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    for (name, file_name, bytes) in files {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        Body::from(body),
    )
}

/// Send a multipart request with a Bearer token.
pub async fn send_multipart(
    app: Router,
    method: &str,
    uri: &str,
    token: &str,
    painting: &serde_json::Value,
    files: &[(&str, &str, &[u8])],
) -> Response<Body> {
    let (content_type, body) = multipart_body(painting, files);
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", content_type)
            .body(body)
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Insert a painting with one valid image row, bypassing the HTTP surface.
pub async fn seed_painting(
    pool: &PgPool,
    title: &str,
    slug: &str,
    status: PaintingStatus,
    sort_index: i32,
) -> Painting {
    let fields = PaintingFields {
        title: title.to_string(),
        height_mm: Some(420.0),
        width_mm: Some(594.0),
        description: None,
        price: Some(1200.0),
        status,
        medium: Some("Oil on canvas".to_string()),
        frame_included: Some(false),
    };
    let painting = PaintingRepo::create(pool, &fields, slug).await.expect("seed painting");
    PaintingRepo::update_sort_index(pool, painting.id, sort_index)
        .await
        .expect("seed sort index");

    PaintingImageRepo::insert(
        pool,
        painting.id,
        &NewPaintingImage {
            image_url: format!("https://blobs.test/{slug}.jpg"),
            alt: Some(title.to_string()),
            is_primary: true,
            is_secondary: false,
            position: 0,
        },
    )
    .await
    .expect("seed image");

    painting
}
