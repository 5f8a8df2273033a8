use evercam_core::{Params, Verb};
use serde_json::Value;

use crate::client::EvercamClient;
use crate::models::{LogPage, LogQuery};
use crate::Result;

impl EvercamClient {
    /// One page of a camera's activity log.
    pub async fn get_logs(&self, camera_id: &str, query: &LogQuery) -> Result<LogPage> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/logs"),
                Verb::Get,
                query.to_params(),
            )
            .await?;

        let Some(Value::Object(mut map)) = data else {
            return Err(self.invalid_response());
        };
        match (map.remove("logs"), map.remove("pages")) {
            (Some(Value::Array(logs)), Some(pages)) => Ok(LogPage { logs, pages }),
            _ => Err(self.invalid_response()),
        }
    }

    /// Record an action in the activity log.
    ///
    /// `values` carries any extra fields for the entry; `camera_id` ties it to
    /// a camera.
    pub async fn create_log(
        &self,
        action: &str,
        values: Params,
        camera_id: Option<&str>,
    ) -> Result<()> {
        let mut params = Params::new().with("action", action);
        params.extend(values);
        params.push_opt("camera_id", camera_id);
        self.fetch("/logs", Verb::Post, params).await?;
        Ok(())
    }
}
