use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::Record;
use crate::Result;

impl EvercamClient {
    /// App settings enabled on a camera.
    pub async fn get_apps(&self, camera_id: &str) -> Result<Option<Record>> {
        let data = self
            .fetch(&format!("/cameras/{camera_id}/apps"), Verb::Get, Params::new())
            .await?;
        self.first_if_any(data, "apps")
    }

    /// Motion detection settings.
    pub async fn get_motion_detections(&self, camera_id: &str) -> Result<Option<Record>> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/apps/motion-detection"),
                Verb::Get,
                Params::new(),
            )
            .await?;
        self.first_if_any(data, "motion_detections")
    }

    /// Cloud recording settings.
    pub async fn get_cloud_recordings(&self, camera_id: &str) -> Result<Option<Record>> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/apps/cloud-recording"),
                Verb::Get,
                Params::new(),
            )
            .await?;
        self.first_if_any(data, "cloud_recordings")
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::test_client;
    use evercam_core::error::INVALID_RESPONSE_MESSAGE;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn apps_return_first_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/cameras/test_camera/apps"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"apps": [{"snapmail": true}]})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/cameras/test_camera/apps/motion-detection"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"motion_detections": []})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/cameras/test_camera/apps/cloud-recording"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"cloud_recordings": [{"frequency": 1}]})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let apps = client.get_apps("test_camera").await.unwrap().unwrap();
        assert_eq!(apps.get("snapmail"), Some(&json!(true)));
        assert!(client
            .get_motion_detections("test_camera")
            .await
            .unwrap()
            .is_none());
        let recording = client
            .get_cloud_recordings("test_camera")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(recording.get("frequency"), Some(&json!(1)));
    }

    #[tokio::test]
    async fn apps_reject_missing_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/cameras/test_camera/apps/cloud-recording"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .get_cloud_recordings("test_camera")
            .await
            .unwrap_err();
        assert_eq!(err.message(), INVALID_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn apps_raise_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/cameras/test_camera/apps"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Unauthorized"})))
            .mount(&server)
            .await;

        let err = test_client(&server).get_apps("test_camera").await.unwrap_err();
        assert_eq!(err.message(), "Unauthorized");
    }
}
