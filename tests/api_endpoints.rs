//! API Endpoint Tests
//!
//! Drives every route of the person API through the assembled router:
//! - status codes and response bodies per endpoint
//! - 422 detail lists with source-prefixed loc paths
//! - 404 for ids missing from the directory
//! - urlencoded form and multipart upload handling

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use persond::api::ApiServer;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

const BOUNDARY: &str = "persond-test-boundary";

fn test_router() -> Router {
    ApiServer::new().router()
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(path: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(test_router(), req).await
}

async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(test_router(), req).await
}

async fn put_json(path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("PUT")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(test_router(), req).await
}

async fn post_form(path: &str, body: &str, extra: &[(&str, &str)]) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    for (name, value) in extra {
        builder = builder.header(*name, *value);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    send(test_router(), req).await
}

fn multipart_body(field: &str, filename: &str, content_type: &str, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_multipart(path: &str, body: Vec<u8>) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    send(test_router(), req).await
}

fn body_keys(body: &Value) -> Vec<&str> {
    body.as_object()
        .expect("object body")
        .keys()
        .map(String::as_str)
        .collect()
}

// =============================================================================
// Home Tests
// =============================================================================

/// The root greets.
#[tokio::test]
async fn test_home_greets() {
    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World" }));
}

// =============================================================================
// Create Person Tests
// =============================================================================

/// A valid person creates and comes back without its password.
#[tokio::test]
async fn test_create_person_returns_public_view() {
    let (status, body) = post_json(
        "/person/new",
        json!({
            "first_name": "John",
            "last_name": "Doe",
            "age": 29,
            "hair_color": "brown",
            "is_married": true,
            "password": "correcthorse"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body_keys(&body),
        vec!["first_name", "last_name", "age", "hair_color", "is_married"]
    );
    assert_eq!(body["age"], json!(29));
}

/// Numeric strings coerce on the way in.
#[tokio::test]
async fn test_create_person_coerces_age_string() {
    let (status, body) = post_json(
        "/person/new",
        json!({
            "first_name": "John",
            "last_name": "Doe",
            "age": "29",
            "password": "correcthorse"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["age"], json!(29));
}

/// All field problems arrive in one 422 detail list.
#[tokio::test]
async fn test_create_person_rejects_invalid_fields() {
    let (status, body) = post_json(
        "/person/new",
        json!({
            "first_name": "J",
            "last_name": "Doe",
            "age": 0,
            "password": "correcthorse"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = body["detail"].as_array().unwrap();
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["loc"], json!(["body", "first_name"]));
    assert_eq!(details[0]["type"], "string_too_short");
    assert_eq!(details[1]["loc"], json!(["body", "age"]));
    assert_eq!(details[1]["type"], "greater_than");
    assert_eq!(details[1]["msg"], "Input should be greater than 0");
    assert_eq!(details[1]["input"], json!(0));
}

/// A body that is not JSON at all still yields the 422 shape.
#[tokio::test]
async fn test_create_person_rejects_malformed_json() {
    let req = Request::builder()
        .method("POST")
        .uri("/person/new")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(test_router(), req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
}

// =============================================================================
// Person Detail Query Tests
// =============================================================================

/// Validated query parameters echo back.
#[tokio::test]
async fn test_person_detail_query_echoes() {
    let (status, body) = get("/person/detail?name=Miguel&age=30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Miguel", "age": "30" }));
}

/// The optional name comes back null when omitted.
#[tokio::test]
async fn test_person_detail_query_optional_name() {
    let (status, body) = get("/person/detail?age=30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": null, "age": "30" }));
}

/// A missing required query parameter reports under the query source.
#[tokio::test]
async fn test_person_detail_query_requires_age() {
    let (status, body) = get("/person/detail?name=Miguel").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "missing");
    assert_eq!(body["detail"][0]["loc"], json!(["query", "age"]));
    assert_eq!(body["detail"][0]["msg"], "Field required");
}

/// The legacy trailing-slash spelling answers directly.
#[tokio::test]
async fn test_person_detail_query_trailing_slash() {
    let (status, body) = get("/person/detail/?age=30").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": null, "age": "30" }));
}

// =============================================================================
// Person Detail Path Tests
// =============================================================================

/// Seeded ids resolve.
#[tokio::test]
async fn test_person_detail_found() {
    let (status, body) = get("/person/detail/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "person_id": 3 }));
}

/// Ids outside the directory are a 404, not a validation failure.
#[tokio::test]
async fn test_person_detail_unknown_id() {
    let (status, body) = get("/person/detail/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Person not found" }));
}

/// A non-positive id fails path validation before any lookup.
#[tokio::test]
async fn test_person_detail_rejects_zero_id() {
    let (status, body) = get("/person/detail/0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "greater_than");
    assert_eq!(body["detail"][0]["loc"], json!(["path", "person_id"]));
}

/// A non-numeric id fails integer coercion.
#[tokio::test]
async fn test_person_detail_rejects_non_numeric_id() {
    let (status, body) = get("/person/detail/abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "int_type");
    assert_eq!(body["detail"][0]["msg"], "Input should be a valid integer");
}

// =============================================================================
// Update Person Tests
// =============================================================================

/// The update reply merges the public person with the location.
#[tokio::test]
async fn test_update_person_returns_merged_view() {
    let (status, body) = put_json(
        "/person/1",
        json!({
            "person": {
                "first_name": "John",
                "last_name": "Doe",
                "age": 29,
                "password": "correcthorse"
            },
            "location": {
                "city": "Bogota",
                "state": "Bogota",
                "country": "Colombia"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body_keys(&body),
        vec!["first_name", "last_name", "age", "city", "state", "country"]
    );
    assert!(body.get("password").is_none());
    assert_eq!(body["city"], json!("Bogota"));
}

/// Path and body problems aggregate into one list, path first.
#[tokio::test]
async fn test_update_person_aggregates_path_and_body_problems() {
    let (status, body) = put_json(
        "/person/0",
        json!({
            "person": {
                "first_name": "John",
                "last_name": "Doe",
                "age": 200,
                "password": "correcthorse"
            },
            "location": { "city": "Bogota" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = body["detail"].as_array().unwrap();
    assert_eq!(details.len(), 4);
    assert_eq!(details[0]["loc"], json!(["path", "person_id"]));
    assert_eq!(details[1]["loc"], json!(["body", "person", "age"]));
    assert_eq!(details[1]["type"], "less_than");
    assert_eq!(details[2]["loc"], json!(["body", "location", "state"]));
    assert_eq!(details[3]["loc"], json!(["body", "location", "country"]));
}

// =============================================================================
// Login Tests
// =============================================================================

/// Login echoes the username with the default message.
#[tokio::test]
async fn test_login_replies_with_default_message() {
    let (status, body) = post_form("/login", "username=miguel&password=secret123", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "username": "miguel", "messages": "Login successful" })
    );
}

/// The password is checked but never echoed.
#[tokio::test]
async fn test_login_never_echoes_password() {
    let (_, body) = post_form("/login", "username=miguel&password=secret123", &[]).await;
    assert!(body.get("password").is_none());
}

/// An over-long username reports under the body source.
#[tokio::test]
async fn test_login_rejects_long_username() {
    let (status, body) = post_form("/login", "username=miguelangelo&password=x", &[]).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_long");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "username"]));
}

/// A request without a urlencoded body still yields the 422 shape.
#[tokio::test]
async fn test_login_rejects_wrong_content_type() {
    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username": "miguel"}"#))
        .unwrap();
    let (status, body) = send(test_router(), req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "form_invalid");
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
}

// =============================================================================
// Contact Tests
// =============================================================================

/// Contact echoes the caller's user agent.
#[tokio::test]
async fn test_contact_echoes_user_agent() {
    let (status, body) = post_form(
        "/contact",
        "first_name=Ana&last_name=Reyes&email=ana%40example.com\
         &message=I+would+like+more+information+please",
        &[("user-agent", "persond-test/1.0")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("persond-test/1.0"));
}

/// Without a user agent the reply is null.
#[tokio::test]
async fn test_contact_without_user_agent() {
    let (status, body) = post_form(
        "/contact",
        "first_name=Ana&last_name=Reyes&email=ana%40example.com\
         &message=I+would+like+more+information+please",
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

/// An ads cookie is read without changing the reply.
#[tokio::test]
async fn test_contact_accepts_ads_cookie() {
    let (status, body) = post_form(
        "/contact",
        "first_name=Ana&last_name=Reyes&email=ana%40example.com\
         &message=I+would+like+more+information+please",
        &[
            ("cookie", "session=abc; ads=tracking-42"),
            ("user-agent", "persond-test/1.0"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("persond-test/1.0"));
}

/// A short message fails its length constraint.
#[tokio::test]
async fn test_contact_rejects_short_message() {
    let (status, body) = post_form(
        "/contact",
        "first_name=Ana&last_name=Reyes&email=ana%40example.com&message=hi",
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_short");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "message"]));
}

/// A bad email address reports a format problem.
#[tokio::test]
async fn test_contact_rejects_bad_email() {
    let (status, body) = post_form(
        "/contact",
        "first_name=Ana&last_name=Reyes&email=not-an-email\
         &message=I+would+like+more+information+please",
        &[],
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "value_error");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "email"]));
    assert_eq!(
        body["detail"][0]["msg"],
        "value is not a valid email address"
    );
}

// =============================================================================
// Upload Tests
// =============================================================================

/// Upload metadata reports name, format, and size in kilobytes.
#[tokio::test]
async fn test_post_image_reports_metadata() {
    let payload = vec![0u8; 512];
    let body = multipart_body("image", "photo.jpg", "image/jpeg", &payload);

    let (status, body) = post_multipart("/post-image", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["File name"], json!("photo.jpg"));
    assert_eq!(body["Format"], json!("image/jpeg"));
    assert_eq!(body["Size(kb)"], json!(0.5));
}

/// Size rounds to two decimals.
#[tokio::test]
async fn test_post_image_rounds_size() {
    let payload = vec![0u8; 1000];
    let body = multipart_body("image", "photo.png", "image/png", &payload);

    let (_, body) = post_multipart("/post-image", body).await;
    assert_eq!(body["Size(kb)"], json!(0.98));
}

/// A multipart body without the image field is a missing-field 422.
#[tokio::test]
async fn test_post_image_requires_image_field() {
    let body = multipart_body("avatar", "photo.jpg", "image/jpeg", b"data");

    let (status, body) = post_multipart("/post-image", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "missing");
    assert_eq!(body["detail"][0]["loc"], json!(["body", "image"]));
}

/// A request without a multipart body still yields the 422 shape.
#[tokio::test]
async fn test_post_image_rejects_wrong_content_type() {
    let req = Request::builder()
        .method("POST")
        .uri("/post-image")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send(test_router(), req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "multipart_invalid");
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
}

/// A body that never reaches a boundary reports broken framing.
#[tokio::test]
async fn test_post_image_rejects_broken_framing() {
    let (status, body) = post_multipart("/post-image", b"no boundary in sight".to_vec()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "multipart_invalid");
    assert_eq!(body["detail"][0]["loc"], json!(["body"]));
}

// =============================================================================
// Middleware Tests
// =============================================================================

/// The default CORS policy answers any origin.
#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let req = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let resp = test_router().oneshot(req).await.unwrap();
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
