use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::{ArchiveUpdate, NewArchive, Record};
use crate::Result;

impl EvercamClient {
    /// Archives recorded for a camera.
    pub async fn get_archives(&self, camera_id: &str) -> Result<Vec<Record>> {
        let data = self
            .fetch(&format!("/cameras/{camera_id}/archives"), Verb::Get, Params::new())
            .await?;
        self.expect_records(data, "archives")
    }

    /// Fetch one archive.
    pub async fn get_archive(&self, camera_id: &str, archive_id: &str) -> Result<Record> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/archives/{archive_id}"),
                Verb::Get,
                Params::new(),
            )
            .await?;
        self.expect_first(data, "archives")
    }

    /// Delete an archive.
    pub async fn delete_archive(&self, camera_id: &str, archive_id: &str) -> Result<()> {
        self.fetch(
            &format!("/cameras/{camera_id}/archives/{archive_id}"),
            Verb::Delete,
            Params::new(),
        )
        .await?;
        Ok(())
    }

    /// Request a new archive clip.
    pub async fn create_archive(&self, camera_id: &str, archive: &NewArchive) -> Result<Record> {
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/archives"),
                Verb::Post,
                archive.to_params(),
            )
            .await?;
        self.expect_first(data, "archives")
    }

    /// Change archive attributes. Nothing is sent when `update` is empty.
    pub async fn update_archive(
        &self,
        camera_id: &str,
        archive_id: &str,
        update: &ArchiveUpdate,
    ) -> Result<()> {
        let params = update.to_params();
        if params.is_empty() {
            return Ok(());
        }
        self.fetch(
            &format!("/cameras/{camera_id}/archives/{archive_id}"),
            Verb::Patch,
            params,
        )
        .await?;
        Ok(())
    }
}
