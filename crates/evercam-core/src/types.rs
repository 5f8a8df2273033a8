//! HTTP verbs and the raw response envelope.

use bytes::Bytes;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{ApiError, Result, UNSUPPORTED_VERB};

/// HTTP verbs accepted by the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Retrieve a resource.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl Verb {
    /// Returns the upper-case verb name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if parameters travel as a form-encoded body rather than a
    /// query string.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    #[must_use]
    pub fn to_method(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl FromStr for Verb {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(ApiError::new(format!(
                "Unrecognised HTTP method '{s}' specified for request."
            ))
            .with_code(UNSUPPORTED_VERB)),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of a completed exchange, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    status: u16,
    body: Bytes,
}

impl ResponseEnvelope {
    /// Wrap a status code and raw body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the envelope, returning the raw body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Returns true for statuses in `200..=299`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns true when the body is empty or only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Parse the body as JSON. Blank bodies yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the parser error for a non-blank body that is not valid JSON.
    pub fn parse_json(&self) -> std::result::Result<Option<Value>, serde_json::Error> {
        if self.is_blank() {
            return Ok(None);
        }
        serde_json::from_slice(&self.body).map(Some)
    }
}
