//! Envelope idempotence and normalization: JSON and XML replies must
//! produce identical caller-facing records.

mod common;

use serde_json::json;
use vms_client::testing::data_body;
use vms_client::{Camera, VmsClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn cameras_from_json(body: serde_json::Value) -> Vec<Camera> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    common::anonymous_client(&server.uri())
        .get_cameras()
        .await
        .unwrap()
}

async fn cameras_from_xml(body: &str) -> Vec<Camera> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/xml"))
        .mount(&server)
        .await;
    common::anonymous_client(&server.uri())
        .get_cameras()
        .await
        .unwrap()
}

#[tokio::test]
async fn json_and_xml_replies_normalize_identically() {
    let from_json = cameras_from_json(data_body(
        "Cameras",
        json!([
            {"Name":"Front Door","Active":true,"ConnectionPort":8601},
            {"Name":"Lobby","Active":false}
        ]),
    ))
    .await;

    let from_xml = cameras_from_xml(
        "<?xml version=\"1.0\"?><Response><Code>0</Code><Data><Cameras>\
         <Camera><Name>Front Door</Name><Active>true</Active>\
         <ConnectionPort>8601</ConnectionPort></Camera>\
         <Camera><Name>Lobby</Name><Active>false</Active></Camera>\
         </Cameras></Data></Response>",
    )
    .await;

    assert_eq!(from_json, from_xml);
    assert_eq!(from_json.len(), 2);
    assert_eq!(from_json[0].connection_port, Some(8601));
    // Explicit false must survive, not collapse into a default.
    assert!(!from_json[1].active);
}

#[tokio::test]
async fn unwrapped_reply_from_a_stand_in_backend_works() {
    let cameras = cameras_from_json(json!({
        "Cameras": [{"name":"Cam-1","active":true,"group":"Lobby"}]
    }))
    .await;
    assert_eq!(cameras.len(), 1);
    assert_eq!(cameras[0].name, "Cam-1");
    assert_eq!(cameras[0].group.as_deref(), Some("Lobby"));
}

#[tokio::test]
async fn cam_1_end_to_end() {
    let cameras = cameras_from_json(data_body(
        "Cameras",
        json!([{
            "Name": "Cam-1",
            "Active": true,
            "Model": "IPC-HDW2431T",
            "DeviceType": 2,
            "ConnectionAddress": "10.0.0.41",
            "ConnectionPort": "8601",
            "Latitude": "41.0082",
            "Longitude": 28.9784,
            "Group": "Entrance",
            "Status": "Recording",
            "Working": true,
            "RecordingHours": "168"
        }]),
    ))
    .await;

    let cam = &cameras[0];
    assert_eq!(cam.name, "Cam-1");
    assert!(cam.active);
    assert_eq!(cam.device_type.as_deref(), Some("2"));
    assert_eq!(cam.connection_port, Some(8601));
    assert_eq!(cam.latitude, Some(41.0082));
    assert_eq!(cam.longitude, Some(28.9784));
    assert_eq!(cam.working, Some(true));
    assert_eq!(cam.recording_hours, Some(168.0));

    let out = serde_json::to_value(cam).unwrap();
    assert_eq!(out["connectionAddress"], "10.0.0.41");
    assert!(out.get("memo").is_none());
}

#[tokio::test]
async fn unknown_camera_status_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data_body("Cameras", json!([]))))
        .mount(&server)
        .await;

    let client: VmsClient = common::anonymous_client(&server.uri());
    assert!(client.get_camera_status("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn typed_stats_accept_both_casings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Dashboard/Stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": {"Code": 0, "Data": {
                "TotalCameras": "12", "ActiveCameras": 10, "RecordingCameras": 7,
                "OfflineCameras": 2, "TotalEvents": 845, "CriticalEvents": 3,
                "TotalStorage": "24 TB", "UsedStorage": "13.1 TB"
            }}
        })))
        .mount(&server)
        .await;

    let stats = common::anonymous_client(&server.uri())
        .dashboard_stats()
        .await
        .unwrap();
    assert_eq!(stats.total_cameras, 12);
    assert_eq!(stats.used_storage, "13.1 TB");
}

#[tokio::test]
async fn garbage_body_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Interface/Cameras/GetCameras"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = common::anonymous_client(&server.uri())
        .get_cameras()
        .await
        .unwrap_err();
    assert!(matches!(err, vms_client::ClientError::MalformedResponse(_)));
}
