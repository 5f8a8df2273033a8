use evercam_core::Verb;
use serde_json::Value;

use crate::client::EvercamClient;
use crate::models::{PublicCameraQuery, PublicCameras};
use crate::Result;

impl EvercamClient {
    /// Search the public camera directory.
    pub async fn get_public_cameras(&self, query: &PublicCameraQuery) -> Result<PublicCameras> {
        let data = self
            .fetch("/public/cameras", Verb::Get, query.to_params())
            .await?;

        let Some(Value::Object(mut map)) = data else {
            return Err(self.invalid_response());
        };
        let pages = map.remove("pages").filter(|pages| !pages.is_null());
        match map.remove("cameras") {
            Some(Value::Array(cameras)) => Ok(PublicCameras { cameras, pages }),
            _ => Err(self.invalid_response()),
        }
    }
}
