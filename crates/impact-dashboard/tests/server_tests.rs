//! HTTP API tests driving the router directly.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use impact_dashboard::config::Config;
use impact_dashboard::loader::Loader;
use impact_dashboard::server::{AppState, router};

fn app(endpoint: &str, initial_key: Option<&str>) -> axum::Router {
    let config = Config::for_testing(endpoint);
    let loader = Loader::new(&config).unwrap();
    let state = AppState::new(loader, "AURIN".to_string(), initial_key.map(String::from));
    router(Arc::new(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_credential(key: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/credential")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "api_key": key }).to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn mount_happy_api(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1" })))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/dsl.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "publications": [{
                "id": "pub.1",
                "title": "Urban analytics at scale",
                "date": "2024-03-10",
                "times_cited": 10,
                "authors": [{
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "researcher_id": "ur.1",
                    "affiliations": [{ "name": "University of Melbourne", "country": "Australia" }]
                }]
            }],
            "_stats": { "total_count": 1 }
        })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_health() {
    let app = app("http://127.0.0.1:9", None);
    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_index_serves_dashboard_page() {
    let app = app("http://127.0.0.1:9", None);
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Research Impact Dashboard"));
}

#[tokio::test]
async fn test_credential_lifecycle() {
    let app = app("http://127.0.0.1:9", None);

    let response = app.clone().oneshot(get("/api/credential")).await.unwrap();
    assert_eq!(body_json(response).await["active"], json!(false));

    let response = app.clone().oneshot(post_credential("my-key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/credential")).await.unwrap();
    assert_eq!(body_json(response).await["active"], json!(true));

    let clear = Request::builder()
        .method("DELETE")
        .uri("/api/credential")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(clear).await.unwrap();
    assert_eq!(body_json(response).await["active"], json!(false));
}

#[tokio::test]
async fn test_blank_credential_rejected() {
    let app = app("http://127.0.0.1:9", None);

    let response = app.clone().oneshot(post_credential("   ")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("blank_credential"));
    assert!(body["message"].as_str().unwrap().contains("API key"));

    // The rejected submission must not activate anything.
    let response = app.oneshot(get("/api/credential")).await.unwrap();
    assert_eq!(body_json(response).await["active"], json!(false));
}

#[tokio::test]
async fn test_report_without_credential() {
    let app = app("http://127.0.0.1:9", None);

    let response = app.oneshot(get("/api/report")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], json!("blank_credential"));
}

#[tokio::test]
async fn test_report_json_happy_path() {
    let mock_server = MockServer::start().await;
    mount_happy_api(&mock_server).await;

    let app = app(&mock_server.uri(), Some("valid-key"));

    let response = app.oneshot(get("/api/report")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["organization"], json!("AURIN"));
    assert_eq!(body["metrics"]["publications"], json!(1));
    assert_eq!(body["metrics"]["citations"], json!(10));
    assert_eq!(body["top_cited"][0]["title"], json!("Urban analytics at scale"));
    assert_eq!(body["organisations"][0]["name"], json!("University of Melbourne"));
    assert_eq!(body["countries"][0]["country"], json!("Australia"));
}

#[tokio::test]
async fn test_report_markdown_format() {
    let mock_server = MockServer::start().await;
    mount_happy_api(&mock_server).await;

    let app = app(&mock_server.uri(), Some("valid-key"));

    let response = app.oneshot(get("/api/report?format=markdown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let markdown = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(markdown.contains("# Research Impact Report: AURIN"));
    assert!(markdown.contains("| Total Publications | 1 |"));
}

#[tokio::test]
async fn test_report_maps_auth_failure_to_401() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&mock_server)
        .await;

    let app = app(&mock_server.uri(), Some("bad-key"));

    let response = app.oneshot(get("/api/report")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], json!("auth"));
    assert!(body["message"].as_str().unwrap().contains("check your API key"));
}

#[tokio::test]
async fn test_report_maps_connectivity_failure_to_502() {
    let app = app("http://127.0.0.1:1", Some("valid-key"));

    let response = app.oneshot(get("/api/report")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], json!("connectivity"));
}
