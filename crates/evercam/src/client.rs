//! Asynchronous Evercam client and the helpers shared by every resource.

use bytes::Bytes;
use evercam_core::error::INVALID_RESPONSE_MESSAGE;
use evercam_core::{
    ApiClient, ApiClientBuilder, ApiError, EvercamConfig, Params, RequestLogger, Verb,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::Level;

use crate::models::Record;
use crate::Result;

/// Builder for [`EvercamClient`].
pub struct EvercamClientBuilder {
    inner: ApiClientBuilder,
}

impl EvercamClientBuilder {
    /// Create a builder from a configuration.
    #[must_use]
    pub fn new(config: EvercamConfig) -> Self {
        Self {
            inner: ApiClientBuilder::new(config),
        }
    }

    /// Route request and error lines to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.inner = self.inner.with_logger(logger);
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner = self.inner.with_user_agent(user_agent);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<EvercamClient> {
        let inner = self.inner.build()?;
        Ok(EvercamClient { inner })
    }
}

/// Asynchronous Evercam API client.
#[derive(Clone)]
pub struct EvercamClient {
    inner: ApiClient,
}

impl EvercamClient {
    /// Construct a client directly from a configuration.
    pub fn new(config: EvercamConfig) -> Result<Self> {
        EvercamClientBuilder::new(config).build()
    }

    /// Start a builder for the given configuration.
    #[must_use]
    pub fn builder(config: EvercamConfig) -> EvercamClientBuilder {
        EvercamClientBuilder::new(config)
    }

    /// The underlying request pipeline, for endpoints without a dedicated
    /// method.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.inner.base_url()
    }

    /// Ping the API, reporting whether the configured credentials are valid.
    pub async fn check_credentials(&self) -> Result<Option<Value>> {
        self.fetch("/test", Verb::Get, Params::new()).await
    }

    pub(crate) async fn fetch(
        &self,
        path: &str,
        verb: Verb,
        params: Params,
    ) -> Result<Option<Value>> {
        let envelope = self.inner.execute(path, verb, params).await?;
        self.inner.interpret(&envelope)
    }

    pub(crate) async fn fetch_raw(&self, path: &str) -> Result<Bytes> {
        let envelope = self.inner.execute(path, Verb::Get, Params::new()).await?;
        self.inner.interpret_raw(envelope)
    }

    /// Log and return the "invalid response" sentinel.
    pub(crate) fn invalid_response(&self) -> ApiError {
        self.inner
            .logger()
            .record(Level::ERROR, INVALID_RESPONSE_MESSAGE);
        ApiError::invalid_response()
    }

    /// The value stored under `key`.
    pub(crate) fn expect_value(&self, data: Option<Value>, key: &str) -> Result<Value> {
        take_key(data, key).ok_or_else(|| self.invalid_response())
    }

    /// The array stored under `key`.
    pub(crate) fn expect_list(&self, data: Option<Value>, key: &str) -> Result<Vec<Value>> {
        match take_key(data, key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(self.invalid_response()),
        }
    }

    /// The array of objects stored under `key`.
    pub(crate) fn expect_records(&self, data: Option<Value>, key: &str) -> Result<Vec<Record>> {
        self.expect_list(data, key)?
            .into_iter()
            .map(|item| self.record_from(item))
            .collect()
    }

    /// The first object under `key`, which must be a non-empty array.
    pub(crate) fn expect_first(&self, data: Option<Value>, key: &str) -> Result<Record> {
        match self.first_if_any(data, key)? {
            Some(record) => Ok(record),
            None => Err(self.invalid_response()),
        }
    }

    /// The first object under `key`, or `None` when the array is empty.
    pub(crate) fn first_if_any(&self, data: Option<Value>, key: &str) -> Result<Option<Record>> {
        self.expect_list(data, key)?
            .into_iter()
            .next()
            .map(|item| self.record_from(item))
            .transpose()
    }

    pub(crate) fn record_from(&self, value: Value) -> Result<Record> {
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(self.invalid_response()),
        }
    }
}

fn take_key(data: Option<Value>, key: &str) -> Option<Value> {
    match data {
        Some(Value::Object(mut map)) => map.remove(key),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{test_client, API_ID, API_KEY};
    use super::*;
    use evercam_core::error::INVALID_RESPONSE;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn check_credentials_returns_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/test"))
            .and(query_param("api_id", API_ID))
            .and(query_param("api_key", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"authenticated": true})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let data = client.check_credentials().await.unwrap();
        assert_eq!(data, Some(json!({"authenticated": true})));
    }

    #[tokio::test]
    async fn check_credentials_raises_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/test"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.check_credentials().await.unwrap_err();
        assert_eq!(err.message(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn expect_helpers_reject_missing_keys() {
        let client = EvercamClient::new(EvercamConfig::new()).unwrap();

        let err = client.expect_list(Some(json!({})), "cameras").unwrap_err();
        assert_eq!(err.message(), INVALID_RESPONSE_MESSAGE);
        assert_eq!(err.code(), INVALID_RESPONSE);

        assert!(client.expect_list(None, "cameras").is_err());
        assert!(client
            .expect_list(Some(json!({"cameras": "nope"})), "cameras")
            .is_err());
        assert!(client
            .expect_first(Some(json!({"cameras": []})), "cameras")
            .is_err());
        assert!(client
            .expect_records(Some(json!({"cameras": [1, 2]})), "cameras")
            .is_err());
    }

    #[test]
    fn expect_helpers_extract_values() {
        let client = EvercamClient::new(EvercamConfig::new()).unwrap();

        let first = client
            .expect_first(Some(json!({"cameras": [{"id": "a"}, {"id": "b"}]})), "cameras")
            .unwrap();
        assert_eq!(first.get("id"), Some(&json!("a")));

        let none = client
            .first_if_any(Some(json!({"apps": []})), "apps")
            .unwrap();
        assert!(none.is_none());

        let value = client
            .expect_value(Some(json!({"data": "base64"})), "data")
            .unwrap();
        assert_eq!(value, json!("base64"));
    }
}
