//! Camera endpoints.

use serde_json::{Value, json};

use crate::client::{CallOptions, VmsClient};
use crate::error::Result;
use crate::models::{self, Camera, CameraGroup};

impl VmsClient {
    /// All configured cameras.
    pub async fn get_cameras(&self) -> Result<Vec<Camera>> {
        let payload = self
            .call(
                "/Interface/Cameras/GetCameras",
                CallOptions::get().data_key("Cameras"),
            )
            .await?;
        Ok(models::normalize_records(payload))
    }

    /// Camera groups.
    pub async fn get_groups(&self) -> Result<Vec<CameraGroup>> {
        let payload = self
            .call(
                "/Interface/Cameras/GetGroups",
                CallOptions::get().data_key("Groups"),
            )
            .await?;
        Ok(models::normalize_records(payload))
    }

    /// Live status for a single camera. `None` when the upstream does not
    /// know the name.
    pub async fn get_camera_status(&self, name: &str) -> Result<Option<Camera>> {
        let payload = self
            .call(
                "/Interface/Cameras/GetStatus",
                CallOptions::get().query("Cameras", name).data_key("Cameras"),
            )
            .await?;
        Ok(models::normalize_records(payload).into_iter().next())
    }

    /// Activate or deactivate a camera. The upstream reply is passed
    /// through as-is.
    pub async fn set_camera_activation(&self, name: &str, action: &str) -> Result<Value> {
        self.call(
            "/Interface/Cameras/Activation",
            CallOptions::post().body(json!({"camera": name, "action": action})),
        )
        .await
    }
}
