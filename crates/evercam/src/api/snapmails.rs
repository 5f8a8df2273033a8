use evercam_core::{Params, Verb};

use crate::client::EvercamClient;
use crate::models::{NewSnapmail, Record, SnapmailUpdate};
use crate::Result;

impl EvercamClient {
    /// Scheduled snapshot emails visible to the caller.
    pub async fn get_snapmails(&self) -> Result<Vec<Record>> {
        let data = self.fetch("/snapmails", Verb::Get, Params::new()).await?;
        self.expect_records(data, "snapmails")
    }

    /// Fetch one snapmail.
    pub async fn get_snapmail(&self, id: &str) -> Result<Record> {
        let data = self
            .fetch(&format!("/snapmails/{id}"), Verb::Get, Params::new())
            .await?;
        self.expect_first(data, "snapmails")
    }

    /// Schedule a snapmail.
    pub async fn create_snapmail(&self, snapmail: &NewSnapmail) -> Result<Record> {
        let data = self
            .fetch("/snapmails", Verb::Post, snapmail.to_params())
            .await?;
        self.expect_first(data, "snapmails")
    }

    /// Change a snapmail. Nothing is sent when `update` is empty.
    pub async fn update_snapmail(&self, id: &str, update: &SnapmailUpdate) -> Result<()> {
        let params = update.to_params();
        if params.is_empty() {
            return Ok(());
        }
        self.fetch(&format!("/snapmails/{id}"), Verb::Patch, params)
            .await?;
        Ok(())
    }

    /// Delete a snapmail.
    pub async fn delete_snapmail(&self, id: &str) -> Result<()> {
        self.fetch(&format!("/snapmails/{id}"), Verb::Delete, Params::new())
            .await?;
        Ok(())
    }

    /// Remove one recipient from a snapmail.
    pub async fn unsubscribe_snapmail(&self, id: &str, email: &str) -> Result<()> {
        self.fetch(
            &format!("/snapmails/{id}/unsubscribe/{email}"),
            Verb::Patch,
            Params::new(),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::test_client;
    use crate::models::{NewSnapmail, SnapmailUpdate};
    use chrono::{NaiveTime, Weekday};
    use evercam_core::error::INVALID_RESPONSE_MESSAGE;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn get_snapmails_lists_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/snapmails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"snapmails": [{}, {}]})))
            .mount(&server)
            .await;

        let snapmails = test_client(&server).get_snapmails().await.unwrap();
        assert_eq!(snapmails.len(), 2);
    }

    #[tokio::test]
    async fn get_snapmail_rejects_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/snapmails/sm1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = test_client(&server).get_snapmail("sm1").await.unwrap_err();
        assert_eq!(err.message(), INVALID_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn create_snapmail_posts_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/snapmails"))
            .and(body_string_contains("subject=Daily"))
            .and(body_string_contains("notify_days=Monday%2CWednesday"))
            .and(body_string_contains("notify_time=08%3A30"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"snapmails": [{"id": "sm1"}]})),
            )
            .mount(&server)
            .await;

        let snapmail = NewSnapmail {
            subject: "Daily".into(),
            camera_exids: vec!["test_camera".into()],
            recipients: vec!["a@b.com".into()],
            notify_days: vec![Weekday::Mon, Weekday::Wed],
            notify_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            timezone: None,
            user_id: None,
        };
        let created = test_client(&server)
            .create_snapmail(&snapmail)
            .await
            .unwrap();
        assert_eq!(created.get("id"), Some(&json!("sm1")));
    }

    #[tokio::test]
    async fn update_snapmail_skips_empty_changes() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v2/snapmails/sm1"))
            .and(body_string_contains("is_paused=true"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .update_snapmail("sm1", &SnapmailUpdate::default())
            .await
            .unwrap();
        let update = SnapmailUpdate {
            is_paused: Some(true),
            ..SnapmailUpdate::default()
        };
        client.update_snapmail("sm1", &update).await.unwrap();
    }

    #[tokio::test]
    async fn unsubscribe_patches_recipient_path() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v2/snapmails/sm1/unsubscribe/a@b.com"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .unsubscribe_snapmail("sm1", "a@b.com")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_snapmail_raises_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/snapmails/sm1"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Unauthorized"})))
            .mount(&server)
            .await;

        let err = test_client(&server).delete_snapmail("sm1").await.unwrap_err();
        assert_eq!(err.message(), "Unauthorized");
    }
}
