use evercam_core::{Params, Verb};
use serde_json::Value;

use crate::client::EvercamClient;
use crate::models::{CameraSettings, Record};
use crate::Result;

impl EvercamClient {
    /// Check that a camera is reachable with the given connection details.
    pub async fn test_camera(
        &self,
        external_url: &str,
        jpg_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Option<Value>> {
        let params = Params::new()
            .with("external_url", external_url)
            .with("jpg_url", jpg_url)
            .with("cam_username", username)
            .with("cam_password", password);
        self.fetch("/cameras/test", Verb::Get, params).await
    }

    /// Fetch a single camera.
    pub async fn get_camera(&self, camera_id: &str, thumbnail: bool) -> Result<Record> {
        let params = Params::new().with("thumbnail", thumbnail);
        let data = self
            .fetch(&format!("/cameras/{camera_id}"), Verb::Get, params)
            .await?;
        self.expect_first(data, "cameras")
    }

    /// Update camera attributes. Nothing is sent when `settings` is empty.
    pub async fn update_camera(&self, camera_id: &str, settings: &CameraSettings) -> Result<()> {
        let params = settings.to_params();
        if params.is_empty() {
            return Ok(());
        }
        self.fetch(&format!("/cameras/{camera_id}"), Verb::Patch, params)
            .await?;
        Ok(())
    }

    /// Delete a camera.
    pub async fn delete_camera(&self, camera_id: &str) -> Result<()> {
        self.fetch(&format!("/cameras/{camera_id}"), Verb::Delete, Params::new())
            .await?;
        Ok(())
    }

    /// Fetch several cameras at once. An empty id list makes no request.
    pub async fn get_cameras(&self, camera_ids: &[&str]) -> Result<Vec<Record>> {
        if camera_ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = Params::new().with("ids", camera_ids.join(","));
        let data = self.fetch("/cameras", Verb::Get, params).await?;
        self.expect_records(data, "cameras")
    }

    /// Register a camera. `camera_id` picks the identifier; the server
    /// generates one when it is `None`.
    pub async fn create_camera(
        &self,
        name: &str,
        is_public: bool,
        settings: &CameraSettings,
        camera_id: Option<&str>,
    ) -> Result<Record> {
        let mut params = Params::new()
            .with("name", name)
            .with("is_public", is_public);
        params.extend(settings.to_params());
        params.push_opt("id", camera_id);
        let data = self.fetch("/cameras", Verb::Post, params).await?;
        self.expect_first(data, "cameras")
    }

    /// Transfer a camera to another user.
    pub async fn change_camera_owner(&self, camera_id: &str, user_id: &str) -> Result<Record> {
        let params = Params::new().with("user_id", user_id);
        let data = self
            .fetch(&format!("/cameras/{camera_id}"), Verb::Put, params)
            .await?;
        self.expect_first(data, "cameras")
    }
}
