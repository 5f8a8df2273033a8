use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::Record;
use crate::Result;

impl EvercamClient {
    /// Every vendor together with its camera models.
    pub async fn get_all_models(&self) -> Result<Vec<Record>> {
        let data = self.fetch("/models", Verb::Get, Params::new()).await?;
        self.expect_records(data, "vendors")
    }

    /// Models offered by one vendor.
    pub async fn get_vendor_models(&self, vendor: &str) -> Result<Record> {
        let data = self
            .fetch(&format!("/models/{vendor}"), Verb::Get, Params::new())
            .await?;
        self.expect_first(data, "vendors")
    }

    /// Fetch one camera model.
    pub async fn get_model(&self, model_id: &str) -> Result<Record> {
        let data = self
            .fetch(&format!("/models/{model_id}"), Verb::Get, Params::new())
            .await?;
        self.expect_first(data, "models")
    }
}
