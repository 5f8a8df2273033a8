use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::Record;
use crate::Result;

impl EvercamClient {
    /// Webhooks registered on a camera, optionally narrowed to one id.
    pub async fn get_webhooks(&self, camera_id: &str, id: Option<&str>) -> Result<Vec<Record>> {
        let mut params = Params::new().with("camera_id", camera_id);
        params.push_opt("id", id);
        let data = self
            .fetch(&format!("/cameras/{camera_id}/webhooks"), Verb::Get, params)
            .await?;
        self.expect_records(data, "webhooks")
    }

    /// Point a webhook at a new URL.
    pub async fn update_webhook(&self, camera_id: &str, webhook_id: &str, url: &str) -> Result<()> {
        let params = Params::new().with("url", url);
        self.fetch(
            &format!("/cameras/{camera_id}/webhooks/{webhook_id}"),
            Verb::Patch,
            params,
        )
        .await?;
        Ok(())
    }

    /// Remove a webhook, returning the deleted record.
    pub async fn delete_webhook(&self, camera_id: &str, webhook_id: &str) -> Result<Record> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/webhooks/{webhook_id}"),
                Verb::Delete,
                Params::new(),
            )
            .await?;
        self.expect_first(data, "webhooks")
    }

    /// Register a webhook.
    pub async fn create_webhook(&self, camera_id: &str, url: &str, user_id: &str) -> Result<Record> {
        let params = Params::new()
            .with("camera_id", camera_id)
            .with("url", url)
            .with("user_id", user_id);
        let data = self
            .fetch(&format!("/cameras/{camera_id}/webhooks"), Verb::Post, params)
            .await?;
        self.expect_first(data, "webhooks")
    }
}
