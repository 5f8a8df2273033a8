use evercam_core::{Params, Verb};
use serde_json::Value;

use crate::client::EvercamClient;
use crate::models::{Record, ShareOptions, ShareOutcome, ShareRequestStatus};
use crate::Result;

impl EvercamClient {
    /// Fetch the share of `camera_id` held by `user_id`, if there is one.
    pub async fn get_camera_share(&self, camera_id: &str, user_id: &str) -> Result<Option<Record>> {
        let params = Params::new().with("user_id", user_id);
        let data = self
            .fetch(&format!("/cameras/{camera_id}/shares"), Verb::Get, params)
            .await?;
        self.first_if_any(data, "shares")
    }

    /// List every share of a camera.
    pub async fn get_camera_shares(&self, camera_id: &str) -> Result<Vec<Record>> {
        let data = self
            .fetch(&format!("/cameras/{camera_id}/shares"), Verb::Get, Params::new())
            .await?;
        self.expect_records(data, "shares")
    }

    /// Share a camera with an email address.
    ///
    /// Recipients without an account receive a share request instead; both
    /// kinds show up in [`ShareOutcome::shares`].
    pub async fn share_camera(
        &self,
        camera_id: &str,
        email: &str,
        rights: &[&str],
        options: &ShareOptions,
    ) -> Result<ShareOutcome> {
        let mut params = Params::new()
            .with("email", email)
            .with("rights", rights.join(","));
        params.extend(options.to_params());
        let data = self
            .fetch(&format!("/cameras/{camera_id}/shares"), Verb::Post, params)
            .await?;

        let Some(Value::Object(mut map)) = data else {
            return Err(self.invalid_response());
        };
        match (map.remove("shares"), map.remove("errors")) {
            (Some(Value::Array(shares)), Some(Value::Array(errors))) => {
                Ok(ShareOutcome { shares, errors })
            }
            _ => Err(self.invalid_response()),
        }
    }

    /// Revoke a share.
    pub async fn delete_camera_share(&self, camera_id: &str, email: &str) -> Result<()> {
        let params = Params::new().with("email", email);
        self.fetch(&format!("/cameras/{camera_id}/shares"), Verb::Delete, params)
            .await?;
        Ok(())
    }

    /// Change the rights granted by a share.
    pub async fn update_camera_share(
        &self,
        camera_id: &str,
        email: &str,
        rights: &[&str],
    ) -> Result<()> {
        let params = Params::new()
            .with("email", email)
            .with("rights", rights.join(","));
        self.fetch(&format!("/cameras/{camera_id}/shares"), Verb::Patch, params)
            .await?;
        Ok(())
    }

    /// List the shares granted to a user.
    pub async fn get_user_camera_shares(&self, user_id: &str) -> Result<Vec<Record>> {
        let data = self
            .fetch(&format!("/users/{user_id}/shares"), Verb::Get, Params::new())
            .await?;
        self.expect_records(data, "shares")
    }

    /// List outstanding share requests for a camera.
    pub async fn get_camera_share_requests(
        &self,
        camera_id: &str,
        status: Option<ShareRequestStatus>,
    ) -> Result<Vec<Record>> {
        let mut params = Params::new();
        params.push_opt("status", status);
        let data = self
            .fetch(
                &format!("/cameras/{camera_id}/shares/requests"),
                Verb::Get,
                params,
            )
            .await?;
        self.expect_records(data, "share_requests")
    }

    /// Withdraw a share request.
    pub async fn cancel_camera_share_request(&self, camera_id: &str, email: &str) -> Result<()> {
        let params = Params::new().with("email", email);
        self.fetch(
            &format!("/cameras/{camera_id}/shares/requests"),
            Verb::Delete,
            params,
        )
        .await?;
        Ok(())
    }

    /// Change the rights offered by a share request.
    pub async fn update_camera_share_request(
        &self,
        camera_id: &str,
        email: &str,
        rights: &[&str],
    ) -> Result<()> {
        let params = Params::new()
            .with("email", email)
            .with("rights", rights.join(","));
        self.fetch(
            &format!("/cameras/{camera_id}/shares/requests"),
            Verb::Patch,
            params,
        )
        .await?;
        Ok(())
    }
}
