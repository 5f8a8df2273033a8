use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::Record;
use crate::Result;

impl EvercamClient {
    /// List every known camera vendor.
    pub async fn get_all_vendors(&self) -> Result<Vec<Record>> {
        let data = self.fetch("/vendors", Verb::Get, Params::new()).await?;
        self.expect_records(data, "vendors")
    }

    /// Vendors whose hardware uses the given MAC address prefix.
    pub async fn get_vendors_by_mac(&self, mac_prefix: &str) -> Result<Vec<Record>> {
        let data = self
            .fetch(&format!("/vendors/{mac_prefix}"), Verb::Get, Params::new())
            .await?;
        self.expect_records(data, "vendors")
    }
}
