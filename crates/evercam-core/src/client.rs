//! The request pipeline.
//!
//! [`ApiClient`] owns the immutable configuration, a `reqwest` client and the
//! logger. [`ApiClient::execute`] builds the versioned URL, merges configured
//! credentials and requester details into the caller's parameters, sends
//! exactly one request and returns the [`ResponseEnvelope`] without judging
//! its status. Interpretation is a separate step.

use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::Level;
use url::Url;

use crate::config::{
    EvercamConfig, AGENT_PARAM, API_ID_PARAM, API_KEY_PARAM, COUNTRY_CODE_PARAM, COUNTRY_PARAM,
    REQUESTER_IP_PARAM,
};
use crate::error::{ApiError, Result};
use crate::logger::{NullLogger, RequestLogger};
use crate::query::Params;
use crate::response::ResponseInterpreter;
use crate::types::{ResponseEnvelope, Verb};

/// Default `User-Agent` header.
pub const USER_AGENT: &str = concat!("evercam-rust/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    config: EvercamConfig,
    logger: Arc<dyn RequestLogger>,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Create a builder from a configuration.
    #[must_use]
    pub fn new(config: EvercamConfig) -> Self {
        Self {
            config,
            logger: Arc::new(NullLogger),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Route request and error lines to `logger`.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if validation fails or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ApiClient> {
        self.config.validate_settings()?;
        Url::parse(&self.config.base_url())?;

        let mut builder = ClientBuilder::new().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| ApiError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(ApiClient {
            http,
            config: Arc::new(self.config),
            logger: self.logger,
        })
    }
}

/// Asynchronous request pipeline for the Evercam API.
///
/// Cloning is cheap; clones share configuration, connection pool and logger.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<EvercamConfig>,
    logger: Arc<dyn RequestLogger>,
}

impl ApiClient {
    /// Construct a client directly from a configuration.
    ///
    /// # Errors
    ///
    /// See [`ApiClientBuilder::build`].
    pub fn new(config: EvercamConfig) -> Result<Self> {
        ApiClientBuilder::new(config).build()
    }

    /// Start a builder for the given configuration.
    #[must_use]
    pub fn builder(config: EvercamConfig) -> ApiClientBuilder {
        ApiClientBuilder::new(config)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &EvercamConfig {
        &self.config
    }

    /// The logger this client reports to.
    #[must_use]
    pub fn logger(&self) -> &dyn RequestLogger {
        self.logger.as_ref()
    }

    /// `scheme://host[:port]`.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.config.base_url()
    }

    /// Fully qualified URL for an endpoint suffix.
    #[must_use]
    pub fn endpoint_url(&self, suffix: &str) -> String {
        self.config.endpoint_url(suffix)
    }

    /// Merge configured credentials and requester details into `params`.
    ///
    /// Keys already supplied by the caller are left untouched.
    #[must_use]
    pub fn request_params(&self, mut params: Params) -> Params {
        let config = &self.config;
        if let Some((api_id, api_key)) = config.credentials() {
            params.push_absent(API_ID_PARAM, api_id);
            params.push_absent(API_KEY_PARAM, api_key);
        }
        if let Some(agent) = &config.agent {
            params.push_absent(AGENT_PARAM, agent);
        }
        if let Some(ip) = &config.requester_ip {
            params.push_absent(REQUESTER_IP_PARAM, ip);
        }
        if let Some(code) = &config.country_code {
            params.push_absent(COUNTRY_CODE_PARAM, code);
        }
        if let Some(country) = &config.country {
            params.push_absent(COUNTRY_PARAM, country);
        }
        params
    }

    /// Send one request and return its status and body.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built or the transport fails.
    /// HTTP error statuses are not errors at this stage.
    pub async fn execute(&self, path: &str, verb: Verb, params: Params) -> Result<ResponseEnvelope> {
        let endpoint = self.endpoint_url(path);
        let url = Url::parse(&endpoint)?;
        let values = self.request_params(params);

        self.logger.record(Level::INFO, &format!("{verb} {endpoint}"));
        self.logger
            .record(Level::INFO, &format!("Parameters: {}", redacted(&values)));

        let mut request = self.http.request(verb.to_method(), url);
        request = if verb.has_body() {
            request.form(values.as_pairs())
        } else {
            request.query(values.as_pairs())
        };

        let started = Instant::now();
        let outcome = send(request).await;
        let elapsed = started.elapsed();
        self.logger.record(
            Level::INFO,
            &format!("API Call Took: {:.3}s", elapsed.as_secs_f64()),
        );

        outcome.map_err(|err| {
            self.logger
                .record(Level::ERROR, &format!("{verb} {endpoint} failed: {err}"));
            err
        })
    }

    /// Interpret a JSON response. See [`ResponseInterpreter::interpret`].
    ///
    /// # Errors
    ///
    /// Fails when the response signals an error or cannot be parsed.
    pub fn interpret(&self, envelope: &ResponseEnvelope) -> Result<Option<Value>> {
        self.interpreter().interpret(envelope)
    }

    /// Interpret a binary response. See [`ResponseInterpreter::interpret_raw`].
    ///
    /// # Errors
    ///
    /// Fails when the response status is outside `200..=299`.
    pub fn interpret_raw(&self, envelope: ResponseEnvelope) -> Result<Bytes> {
        self.interpreter().interpret_raw(envelope)
    }

    /// An interpreter bound to this client's logger.
    #[must_use]
    pub fn interpreter(&self) -> ResponseInterpreter<'_> {
        ResponseInterpreter::new(self.logger.as_ref())
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<ResponseEnvelope> {
    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    Ok(ResponseEnvelope::new(status, body))
}

fn redacted(params: &Params) -> Params {
    params
        .as_pairs()
        .iter()
        .map(|(key, value)| {
            let shown = if key == API_KEY_PARAM { "[REDACTED]" } else { value.as_str() };
            (key.as_str(), shown)
        })
        .collect()
}
