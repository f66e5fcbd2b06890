//! Router tests: success passthrough and the generic 502 mapping.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use vms_client::VmsClientBuilder;
use vms_client::testing::data_body;
use vms_config::{AuthStrategy, Credentials};
use vms_server::routes::{AppState, router};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Router wired to an unauthenticated client, matching the stand-in
/// backend mode.
fn app(upstream: &MockServer) -> Router {
    let client = VmsClientBuilder::new(
        upstream.uri(),
        Credentials {
            username: String::new(),
            password: SecretString::from(""),
            strategy: AuthStrategy::Basic,
        },
    )
    .build()
    .expect("client should build");
    router(AppState { client })
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_does_not_touch_the_upstream() {
    let upstream = MockServer::start().await;
    let (status, body) = get_json(app(&upstream), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn cameras_pass_through_normalized() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body(
            "Cameras",
            json!([{"Name":"Cam-1","Active":true,"Group":"Lobby"}]),
        )))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get_json(app(&upstream), "/api/cameras").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Cam-1");
    assert_eq!(body[0]["active"], true);
    assert_eq!(body[0]["group"], "Lobby");
}

#[tokio::test]
async fn upstream_failure_maps_to_generic_502() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal detail: disk full"))
        .mount(&upstream)
        .await;

    let (status, body) = get_json(app(&upstream), "/api/cameras").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"message": "Upstream API unavailable"}));
}

#[tokio::test]
async fn malformed_upstream_body_also_maps_to_502() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Dashboard/Stats"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&upstream)
        .await;

    let (status, body) = get_json(app(&upstream), "/api/dashboard/stats").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Upstream API unavailable");
}

#[tokio::test]
async fn unknown_camera_status_is_null() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body("Cameras", json!([]))))
        .mount(&upstream)
        .await;

    let (status, body) = get_json(app(&upstream), "/api/cameras/nope/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn event_query_parameters_are_forwarded() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Analytics/Search"))
        .and(wiremock::matchers::query_param("StartDate", "2026-01-01"))
        .and(wiremock::matchers::query_param("EventTypes", "Intrusion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body("Events", json!([]))))
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, body) = get_json(
        app(&upstream),
        "/api/analytics/events?startDate=2026-01-01&eventTypes=Intrusion",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn bookmark_creation_posts_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Interface/Cameras/Bookmarks/Add"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"Response": {"Code": 0, "Message": "OK"}})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/bookmarks")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "title": "Intrusion review",
                "color": "red",
                "startDate": "2026-01-05",
                "startTime": "14:02:00",
                "cameras": ["Cam-1"]
            })
            .to_string(),
        ))
        .unwrap();
    let response = app(&upstream).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
