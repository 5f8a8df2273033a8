use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::{NewUser, Record, UserUpdate};
use crate::Result;

impl EvercamClient {
    /// Fetch a user by name or email.
    pub async fn get_user(&self, user: &str) -> Result<Record> {
        let data = self
            .fetch(&format!("/users/{user}"), Verb::Get, Params::new())
            .await?;
        self.expect_first(data, "users")
    }

    /// Cameras owned by `user`, optionally including those shared with them.
    pub async fn get_user_cameras(
        &self,
        user: &str,
        shared: bool,
        thumbnail: bool,
    ) -> Result<Vec<Record>> {
        let params = Params::new()
            .with("include_shared", shared)
            .with("thumbnail", thumbnail)
            .with("user_id", user);
        let data = self.fetch("/cameras", Verb::Get, params).await?;
        self.expect_records(data, "cameras")
    }

    /// Update profile fields. Nothing is sent when `update` is empty.
    pub async fn update_user(&self, user: &str, update: &UserUpdate) -> Result<()> {
        let params = update.to_params();
        if params.is_empty() {
            return Ok(());
        }
        self.fetch(&format!("/users/{user}"), Verb::Patch, params)
            .await?;
        Ok(())
    }

    /// Delete a user account.
    pub async fn delete_user(&self, user: &str) -> Result<()> {
        self.fetch(&format!("/users/{user}"), Verb::Delete, Params::new())
            .await?;
        Ok(())
    }

    /// Register a user account.
    pub async fn create_user(&self, user: &NewUser) -> Result<Record> {
        let data = self.fetch("/users", Verb::Post, user.to_params()).await?;
        self.expect_first(data, "users")
    }
}
