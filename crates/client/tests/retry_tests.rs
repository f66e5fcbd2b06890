//! Auth-failure retry behavior: exactly one transparent retry under
//! session auth, and none anywhere else.

mod common;

use serde_json::json;
use vms_client::ClientError;
use vms_client::testing::{auth_error_body, data_body, session_body};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NONCE: &str = "68F1EE37050F456851DC90D62791839E";

async fn mount_session_creation(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/Interface/CreateAuthSession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body(32, NONCE)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn auth_error_code_retries_once_and_succeeds() {
    let server = MockServer::start().await;
    mount_session_creation(&server, 2).await;
    // First data call hits a stale-session rejection, the replay succeeds.
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_error_body()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body(
            "Cameras",
            json!([{"Name":"Cam-1","Active":true}]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::session_client(&server.uri());
    let cameras = client.get_cameras().await.unwrap();
    assert_eq!(cameras.len(), 1);
    assert_eq!(cameras[0].name, "Cam-1");
}

#[tokio::test]
async fn persistent_auth_error_fails_after_two_attempts() {
    let server = MockServer::start().await;
    mount_session_creation(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_error_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = common::session_client(&server.uri());
    let err = client.get_cameras().await.unwrap_err();
    assert!(matches!(err, ClientError::AuthExhausted));
}

#[tokio::test]
async fn http_unauthorized_also_triggers_the_single_retry() {
    let server = MockServer::start().await;
    mount_session_creation(&server, 2).await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let client = common::session_client(&server.uri());
    let err = client.get_cameras().await.unwrap_err();
    assert!(matches!(err, ClientError::AuthExhausted));
}

#[tokio::test]
async fn basic_auth_never_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::basic_client(&server.uri());
    let err = client.get_cameras().await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;
    mount_session_creation(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::session_client(&server.uri());
    let err = client.get_cameras().await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 500, .. }));
}

#[tokio::test]
async fn data_calls_carry_session_and_format_parameters() {
    let server = MockServer::start().await;
    mount_session_creation(&server, 1).await;
    let digest = vms_client::digest::auth_digest(common::USERNAME, common::PASSWORD, NONCE);
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .and(query_param("ResponseFormat", "JSON"))
        .and(query_param("AuthSession", "32"))
        .and(query_param("AuthData", digest))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(data_body("Cameras", json!([]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::session_client(&server.uri());
    assert!(client.get_cameras().await.unwrap().is_empty());
}
