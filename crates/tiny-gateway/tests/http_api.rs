use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tiny_gateway::{App, AppState, Authorizer};
use tiny_generator::seq::SeqGenerator;
use tiny_shortener::ShortenerService;
use tiny_storage::InMemoryStorage;
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

fn router(authorizer: Authorizer) -> Router {
    let service = ShortenerService::new(InMemoryStorage::new(), SeqGenerator::with_prefix("t"));
    App::router(AppState::new(Arc::new(service), authorizer))
}

fn open_router() -> Router {
    router(Authorizer::default())
}

fn locked_router() -> Router {
    router(
        Authorizer::builder()
            .read_token("reader")
            .write_token("writer")
            .build(),
    )
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    form: Option<&str>,
) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match form {
        Some(form) => {
            request = request.header(header::CONTENT_TYPE, FORM);
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let router = open_router();
    let response = send(&router, Method::GET, "/health", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn api_description_is_served_as_yaml() {
    let router = locked_router();
    let response = send(&router, Method::GET, "/api", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/x-yaml"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("openapi: "));
    assert!(text.contains("/api/tiny/{id}/expand:"));
}

#[tokio::test]
async fn list_starts_empty() {
    let router = open_router();
    let response = send(&router, Method::GET, "/api/tiny", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_json(response).await, Value::Array(Vec::new()));
}

#[tokio::test]
async fn create_follow_expand() {
    let router = open_router();

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo&url=foo.bar"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["id"], "foo");
    assert_eq!(created["url"], "http://foo.bar");
    assert!(created["created"].is_i64());

    let response = send(&router, Method::GET, "/api/tiny/foo", None, None).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "http://foo.bar");

    let response = send(&router, Method::GET, "/api/tiny/foo/expand", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);

    let response = send(&router, Method::GET, "/api/tiny", None, None).await;
    assert_eq!(body_json(response).await, Value::Array(vec![created]));
}

#[tokio::test]
async fn create_with_generated_id() {
    let router = open_router();

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("url=https%3A%2F%2Fhello.world"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["id"], "t000000");
    assert_eq!(created["url"], "https://hello.world");
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let router = open_router();

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo%20bar&url=foo.bar"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo&url=http%3A%2F%2Ffoo%20bar"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo&url=foo.bar"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo&url=lorem.ipsum"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn urls_with_control_characters_are_rejected() {
    let router = open_router();

    for form in [
        "id=nl&url=http%3A%2F%2Ffoo.bar%2Fa%0Ab",
        "id=sp&url=http%3A%2F%2Ffoo.bar%20",
        "id=tab&url=http%3A%2F%2Ffo%09o.bar",
    ] {
        let response = send(&router, Method::POST, "/api/tiny", None, Some(form)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{form}");
    }

    let response = send(&router, Method::GET, "/api/tiny", None, None).await;
    assert_eq!(body_json(response).await, Value::Array(Vec::new()));
}

#[tokio::test]
async fn missing_entries_are_not_found() {
    let router = open_router();

    let response = send(&router, Method::GET, "/api/tiny/nope", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&router, Method::GET, "/api/tiny/nope/expand", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &router,
        Method::POST,
        "/api/tiny/nope",
        None,
        Some("url=foo.bar"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_then_delete() {
    let router = open_router();
    send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo&url=foo.bar"),
    )
    .await;

    let response = send(
        &router,
        Method::POST,
        "/api/tiny/foo",
        None,
        Some("url=lorem.ipsum"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, Method::GET, "/api/tiny/foo", None, None).await;
    assert_eq!(response.headers()[header::LOCATION], "http://lorem.ipsum");

    let response = send(&router, Method::DELETE, "/api/tiny/foo", None, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, Method::DELETE, "/api/tiny/foo", None, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&router, Method::GET, "/api/tiny/foo", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tokens_guard_the_api() {
    let router = locked_router();

    let response = send(&router, Method::GET, "/api/tiny", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&router, Method::GET, "/api/tiny", Some("writer"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&router, Method::GET, "/api/tiny", Some("reader"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let form = Some("id=foo&url=foo.bar");
    let response = send(&router, Method::POST, "/api/tiny", None, form).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&router, Method::POST, "/api/tiny", Some("reader"), form).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&router, Method::POST, "/api/tiny", Some("writer"), form).await;
    assert_eq!(response.status(), StatusCode::OK);

    // following a link never needs a token
    let response = send(&router, Method::GET, "/api/tiny/foo", None, None).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);

    let response = send(&router, Method::GET, "/api/tiny/foo/expand", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&router, Method::GET, "/api/tiny/foo/expand", Some("reader"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&router, Method::DELETE, "/api/tiny/foo", Some("reader"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&router, Method::DELETE, "/api/tiny/foo", Some("writer"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn bearer_scheme_is_case_insensitive() {
    let router = locked_router();
    let request = Request::builder()
        .uri("/api/tiny")
        .header(header::AUTHORIZATION, "bearer reader")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn public_create_only_for_generated_ids() {
    let router = router(
        Authorizer::builder()
            .write_token("writer")
            .allow_public_create(true)
            .build(),
    );

    let response = send(&router, Method::POST, "/api/tiny", None, Some("url=foo.bar")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &router,
        Method::POST,
        "/api/tiny",
        None,
        Some("id=foo&url=foo.bar"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
