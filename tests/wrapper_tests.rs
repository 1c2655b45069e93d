//! End-to-end tests for the route-wrapping validation layer
//!
//! These tests verify that:
//! - Valid requests reach the handler exactly once, with transformed data
//!   attached to the request
//! - Invalid requests are rejected with 400 before the handler runs
//! - Query is validated before body when both are invalid
//! - Raw request data stays readable behind the validated view

use axum::http::StatusCode;
use axum_test::TestServer;
use preflight::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("preflight=debug")
        .try_init();
}

/// Query: `required` must be a string, coerced to a boolean.
/// Body: `required` must be a boolean, `optional` an optional string.
fn route_schemas() -> RouteSchemas {
    RouteSchemas::new()
        .query(ObjectSchema::new().field(
            "required",
            FieldRule::required()
                .check(validators::string())
                .map(transforms::to_boolean()),
        ))
        .body(
            ObjectSchema::new()
                .field("optional", FieldRule::optional().check(validators::string()))
                .field("required", FieldRule::required().check(validators::boolean())),
        )
}

fn server_with_handler(schemas: RouteSchemas) -> (TestServer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let app = Router::new().route(
        "/validate",
        post(move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "ok": true }))
            }
        })
        .layer(ValidateLayer::new(schemas)),
    );
    (TestServer::new(app), calls)
}

fn echo_server(schemas: RouteSchemas) -> TestServer {
    let app = Router::new().route(
        "/validate",
        post(|Parsed(data): Parsed| async move { Json(data) })
            .layer(ValidateLayer::new(schemas)),
    );
    TestServer::new(app)
}

#[tokio::test]
async fn returns_200_when_query_and_body_match() {
    init_tracing();
    let (server, calls) = server_with_handler(route_schemas());

    let res = server
        .post("/validate?required=true")
        .json(&json!({ "required": true }))
        .await;

    res.assert_status_ok();
    res.assert_json(&json!({ "ok": true }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn returns_400_when_body_does_not_match() {
    init_tracing();
    let (server, calls) = server_with_handler(route_schemas());

    // Query is fine, body is absent entirely.
    let res = server.post("/validate?required=true").await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["issues"][0]["path"], json!(["required"]));
    assert_eq!(body["issues"][0]["code"], "required");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn returns_400_when_query_does_not_match() {
    let (server, calls) = server_with_handler(route_schemas());

    let res = server
        .post("/validate")
        .json(&json!({ "required": true }))
        .await;

    res.assert_status_bad_request();
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn reports_query_issues_when_both_sources_are_invalid() {
    let (server, _) = server_with_handler(route_schemas());

    // Query misses its field (code "required"); the body field has the wrong
    // type, which would report code "invalid". Only the query's issue must
    // surface.
    let res = server
        .post("/validate")
        .json(&json!({ "required": "not-a-bool" }))
        .await;

    res.assert_status_bad_request();
    let body: Value = res.json();
    let issues = body["issues"].as_array().expect("issues");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["code"], "required");
}

#[tokio::test]
async fn passes_parsed_data_to_the_handler() {
    let server = echo_server(route_schemas());

    let res = server
        .post("/validate?required=true")
        .json(&json!({ "required": true, "optional": "note" }))
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    // The query arrived as the string "true" and comes out a boolean.
    assert_eq!(body["query"]["required"], json!(true));
    assert_eq!(body["body"]["required"], json!(true));
    assert_eq!(body["body"]["optional"], json!("note"));
}

#[tokio::test]
async fn handler_sees_transformed_output_not_raw_input() {
    let server = echo_server(route_schemas());

    // An empty string coerces to false; the raw input was still a string.
    let res = server
        .post("/validate?required=")
        .json(&json!({ "required": false }))
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["query"]["required"], json!(false));
}

#[tokio::test]
async fn identical_requests_yield_identical_parsed_results() {
    let server = echo_server(route_schemas());

    let first = server
        .post("/validate?required=true")
        .json(&json!({ "required": true }))
        .await;
    let second = server
        .post("/validate?required=true")
        .json(&json!({ "required": true }))
        .await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_eq!(first.json::<Value>(), second.json::<Value>());
}

#[tokio::test]
async fn handler_response_passes_through_unchanged() {
    let app = Router::new().route(
        "/validate",
        post(|| async { (StatusCode::CREATED, Json(json!({ "created": true }))) })
            .layer(ValidateLayer::new(route_schemas())),
    );
    let server = TestServer::new(app);

    let res = server
        .post("/validate?required=true")
        .json(&json!({ "required": true }))
        .await;

    res.assert_status(StatusCode::CREATED);
    res.assert_json(&json!({ "created": true }));
}

#[tokio::test]
async fn raw_body_stays_readable_behind_the_validated_view() {
    let app = Router::new().route(
        "/validate",
        post(|Parsed(data): Parsed, raw: String| async move {
            Json(json!({ "raw": raw, "parsed": data.body }))
        })
        .layer(ValidateLayer::new(route_schemas())),
    );
    let server = TestServer::new(app);

    let res = server
        .post("/validate?required=true")
        .json(&json!({"required":true}))
        .await;

    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["raw"], json!(r#"{"required":true}"#));
    assert_eq!(body["parsed"]["required"], json!(true));
}

#[tokio::test]
async fn wrapping_without_schemas_is_a_noop() {
    let app = Router::new().route(
        "/validate",
        post(|Parsed(data): Parsed| async move { Json(data) })
            .layer(ValidateLayer::new(RouteSchemas::new())),
    );
    let server = TestServer::new(app);

    let res = server.post("/validate").await;

    res.assert_status_ok();
    res.assert_json(&json!({}));
}

#[tokio::test]
async fn unparseable_body_is_not_a_validation_error() {
    let (server, calls) = server_with_handler(route_schemas());

    let res = server.post("/validate?required=true").text("{oops").await;

    res.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json();
    assert_eq!(body["code"], "INTERNAL_ERROR");
    assert!(body.get("issues").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
