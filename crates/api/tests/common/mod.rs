#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use pawhaven_api::auth::jwt::JwtConfig;
use pawhaven_api::auth::password::hash_password;
use pawhaven_api::config::{MediaConfig, ServerConfig};
use pawhaven_api::router::build_app_router;
use pawhaven_api::state::AppState;
use pawhaven_api::storage::LocalMediaStorage;
use pawhaven_db::models::user::{CreateUser, User};
use pawhaven_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-battery";

/// Smallest byte string `image::guess_format` recognizes as PNG.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

/// Build a test `ServerConfig` with safe defaults.
///
/// Each call gets its own media directory under the system temp dir so
/// uploads from parallel tests never collide.
pub fn test_config() -> ServerConfig {
    let media_root: PathBuf = std::env::temp_dir().join(format!(
        "pawhaven-test-media-{}",
        uuid::Uuid::new_v4().simple()
    ));
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        allowed_hosts: Vec::new(),
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
            refresh_token_expiry_days: 1,
        },
        media: MediaConfig {
            root: media_root,
            url_prefix: "/media".to_string(),
        },
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let storage = LocalMediaStorage::new(&config.media.root, config.media.url_prefix.clone());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(storage),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`PASSWORD`] directly through the repository.
pub async fn create_user(pool: &PgPool, username: &str, is_staff: bool) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
        is_staff,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the access token.
pub async fn login(app: &Router, username: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": PASSWORD });
    let response = post_json(app.clone(), "/api/login", body).await;
    assert_eq!(response.status(), 200, "login for {username} should succeed");
    let json = body_json(response).await;
    json["access"]
        .as_str()
        .expect("login response must contain an access token")
        .to_string()
}

/// Create a pet through the API as the holder of `token`; returns its JSON.
pub async fn create_pet(app: &Router, token: &str, name: &str, pet_type: &str) -> serde_json::Value {
    let response = send_multipart(
        app.clone(),
        Method::POST,
        "/api/pets",
        Some(token),
        &[
            Part::text("name", name),
            Part::text("type", pet_type),
            Part::text("age", "3"),
        ],
    )
    .await;
    assert_eq!(response.status(), 201, "pet creation should succeed");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = builder(Method::GET, uri, None).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = builder(Method::GET, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = builder(Method::DELETE, uri, Some(token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(token), body).await
}

/// One `multipart/form-data` part.
pub enum Part {
    Text(&'static str, String),
    File(&'static str, &'static str, Vec<u8>),
}

impl Part {
    pub fn text(name: &'static str, value: &str) -> Self {
        Part::Text(name, value.to_string())
    }

    pub fn file(name: &'static str, filename: &'static str, bytes: &[u8]) -> Self {
        Part::File(name, filename, bytes.to_vec())
    }
}

const BOUNDARY: &str = "pawhaven-test-boundary";

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; \
                         filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    parts: &[Part],
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap();
    send(app, request).await
}

/// Read the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Read the response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}
