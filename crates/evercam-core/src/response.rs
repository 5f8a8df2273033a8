//! Response interpretation.
//!
//! The API signals failure in two ways: a non-2xx status, or a 2xx status whose
//! JSON body carries a `"message"` key. [`ResponseInterpreter`] folds both into
//! [`ApiError`] and otherwise hands back the parsed body (or, for binary
//! endpoints, the untouched bytes).

use bytes::Bytes;
use serde_json::Value;
use tracing::Level;

use crate::error::{ApiError, Result, GENERIC_ERROR_MESSAGE, INVALID_RESPONSE};
use crate::logger::RequestLogger;
use crate::types::ResponseEnvelope;

/// Classifies envelopes and raises errors through the configured logger.
#[derive(Clone, Copy)]
pub struct ResponseInterpreter<'a> {
    logger: &'a dyn RequestLogger,
}

impl<'a> ResponseInterpreter<'a> {
    /// Create an interpreter that logs through `logger`.
    #[must_use]
    pub fn new(logger: &'a dyn RequestLogger) -> Self {
        Self { logger }
    }

    /// Interpret a JSON response.
    ///
    /// Returns `Ok(None)` for a successful response with a blank body.
    ///
    /// # Errors
    ///
    /// Fails for non-2xx statuses, for success bodies that are not JSON, and
    /// for success bodies that carry an error `"message"`.
    pub fn interpret(&self, envelope: &ResponseEnvelope) -> Result<Option<Value>> {
        let status = envelope.status();

        if !envelope.is_success() {
            self.logger.record(
                Level::ERROR,
                &format!("API call returned with a status of {status}."),
            );
            let data = self.parse_body(envelope);
            return Err(self.error_from_payload(data.as_ref(), status));
        }

        if envelope.is_blank() {
            return Ok(None);
        }

        let Some(data) = self.parse_body(envelope) else {
            let message =
                "API call failed to return any data or contained data that could not be parsed.";
            self.logger.record(Level::ERROR, message);
            return Err(ApiError::new(message)
                .with_code(INVALID_RESPONSE)
                .with_status(status));
        };

        if carries_message(&data) {
            return Err(self.error_from_payload(Some(&data), status));
        }

        Ok(Some(data))
    }

    /// Interpret a binary response, returning the body untouched on success.
    ///
    /// # Errors
    ///
    /// Fails for non-2xx statuses, using the server's message when the body
    /// is a JSON error payload.
    pub fn interpret_raw(&self, envelope: ResponseEnvelope) -> Result<Bytes> {
        if envelope.is_success() {
            return Ok(envelope.into_body());
        }

        let status = envelope.status();
        match self.parse_body(&envelope) {
            Some(data) if carries_message(&data) => Err(self.error_from_payload(Some(&data), status)),
            _ => {
                let message = format!(
                    "API call returned a {status} code. Response body was '{}'.",
                    envelope.text()
                );
                self.logger.record(Level::ERROR, &message);
                Err(ApiError::new(message)
                    .with_code(INVALID_RESPONSE)
                    .with_status(status))
            }
        }
    }

    /// Build the error for a server error payload.
    ///
    /// The message comes from `"message"`, falling back to a generic text when
    /// it is absent or null. The code comes from `"code"` and the context from
    /// `"context"`. A missing payload is reported as `invalid_response`.
    #[must_use]
    pub fn error_from_payload(&self, data: Option<&Value>, status: u16) -> ApiError {
        let message = data
            .and_then(|d| d.get("message"))
            .filter(|m| !m.is_null())
            .map_or_else(|| GENERIC_ERROR_MESSAGE.to_string(), value_text);
        let code = match data {
            None => Some(INVALID_RESPONSE.to_string()),
            Some(d) => d.get("code").filter(|c| !c.is_null()).map(value_text),
        };
        let context = match data.and_then(|d| d.get("context")) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => vec![other.clone()],
        };

        self.logger.record(
            Level::ERROR,
            &format!(
                "API response contains error details.\nMessage: {message}\nCode: {}\nStatus: {status}",
                code.as_deref().unwrap_or("")
            ),
        );

        ApiError::new(message)
            .with_optional_code(code)
            .with_status(status)
            .with_context(context)
    }

    fn parse_body(&self, envelope: &ResponseEnvelope) -> Option<Value> {
        match envelope.parse_json() {
            Ok(data) => data,
            Err(err) => {
                self.logger.record(
                    Level::ERROR,
                    &format!("Error interpreting response for API call.\nCause: {err}"),
                );
                None
            }
        }
    }
}

fn carries_message(data: &Value) -> bool {
    data.as_object().is_some_and(|map| map.contains_key("message"))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNKNOWN_ERROR;
    use crate::logger::testing::RecordingLogger;
    use crate::logger::{MockRequestLogger, NullLogger};
    use serde_json::json;

    fn interpret(status: u16, body: &'static str) -> Result<Option<Value>> {
        ResponseInterpreter::new(&NullLogger).interpret(&ResponseEnvelope::new(status, body))
    }

    #[test]
    fn success_with_empty_body_is_none() {
        assert_eq!(interpret(200, "").unwrap(), None);
        assert_eq!(interpret(204, "   \n").unwrap(), None);
    }

    #[test]
    fn success_with_json_returns_data() {
        let data = interpret(200, r#"{"cameras": [{}]}"#).unwrap();
        assert_eq!(data, Some(json!({"cameras": [{}]})));
    }

    #[test]
    fn success_with_empty_object_returns_empty_object() {
        assert_eq!(interpret(200, "{}").unwrap(), Some(json!({})));
    }

    #[test]
    fn success_with_malformed_body_is_invalid_response() {
        let logger = RecordingLogger::default();
        let err = ResponseInterpreter::new(&logger)
            .interpret(&ResponseEnvelope::new(201, "not json"))
            .unwrap_err();
        assert_eq!(err.code(), INVALID_RESPONSE);
        assert_eq!(err.status(), Some(201));
        assert_eq!(logger.errors().len(), 2);
    }

    #[test]
    fn success_with_message_raises() {
        let err = interpret(200, r#"{"message": "Camera offline", "code": "offline"}"#).unwrap_err();
        assert_eq!(err.message(), "Camera offline");
        assert_eq!(err.code(), "offline");
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn failure_uses_server_message() {
        let err = interpret(403, r#"{"message": "Unauthorized"}"#).unwrap_err();
        assert_eq!(err.message(), "Unauthorized");
        assert_eq!(err.code(), UNKNOWN_ERROR);
        assert_eq!(err.raw_code(), None);
        assert_eq!(err.status(), Some(403));
        assert!(err.context().is_empty());
    }

    #[test]
    fn failure_without_payload_uses_generic_message() {
        let err = interpret(500, "").unwrap_err();
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.code(), INVALID_RESPONSE);
        assert_eq!(err.status(), Some(500));

        let err = interpret(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn null_message_falls_back_to_generic_text() {
        let err = interpret(422, r#"{"message": null, "code": "bad"}"#).unwrap_err();
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.code(), "bad");
        assert_eq!(err.status(), Some(422));

        let err = interpret(200, r#"{"message": null}"#).unwrap_err();
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.code(), UNKNOWN_ERROR);
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn null_message_is_logged_with_generic_text() {
        let mut logger = MockRequestLogger::new();
        logger
            .expect_record()
            .withf(|level, line| {
                *level == Level::ERROR && line.starts_with("API call returned with a status of 422.")
            })
            .times(1)
            .return_const(());
        logger
            .expect_record()
            .withf(|level, line| {
                *level == Level::ERROR
                    && line.contains("Message: API call returned an error.\n")
                    && !line.contains("null")
            })
            .times(1)
            .return_const(());

        let err = ResponseInterpreter::new(&logger)
            .interpret(&ResponseEnvelope::new(422, r#"{"message": null}"#))
            .unwrap_err();
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn non_string_message_is_rendered_as_text() {
        let err = interpret(400, r#"{"message": 42}"#).unwrap_err();
        assert_eq!(err.message(), "42");

        let err = interpret(400, r#"{"message": ["a", "b"]}"#).unwrap_err();
        assert_eq!(err.message(), r#"["a","b"]"#);
    }

    #[test]
    fn non_object_error_body_uses_generic_message() {
        for body in ["[1,2]", r#""oops""#, "7"] {
            let err = interpret(400, body).unwrap_err();
            assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
            assert_eq!(err.raw_code(), None);
            assert_eq!(err.status(), Some(400));
            assert!(err.context().is_empty());
        }
    }

    #[test]
    fn failure_carries_code_and_context() {
        let err = interpret(
            400,
            r#"{"message": "Invalid", "code": "bad_params", "context": ["name", 2]}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), "bad_params");
        assert_eq!(err.context(), &[json!("name"), json!(2)]);
    }

    #[test]
    fn scalar_context_becomes_single_entry() {
        let err = interpret(400, r#"{"message": "Invalid", "context": "name"}"#).unwrap_err();
        assert_eq!(err.context(), &[json!("name")]);
    }

    #[test]
    fn failures_are_logged_before_returning() {
        let logger = RecordingLogger::default();
        let _ = ResponseInterpreter::new(&logger)
            .interpret(&ResponseEnvelope::new(404, r#"{"message": "Not Found", "code": "nf"}"#));
        let errors = logger.errors();
        assert_eq!(errors[0], "API call returned with a status of 404.");
        assert!(errors[1].contains("Message: Not Found"));
        assert!(errors[1].contains("Code: nf"));
        assert!(errors[1].contains("Status: 404"));
    }

    #[test]
    fn raw_success_returns_bytes_unmodified() {
        let jpeg: &'static [u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'{'];
        let bytes = ResponseInterpreter::new(&NullLogger)
            .interpret_raw(ResponseEnvelope::new(200, jpeg))
            .unwrap();
        assert_eq!(bytes.as_ref(), jpeg);
    }

    #[test]
    fn raw_success_with_message_body_is_not_parsed() {
        let bytes = ResponseInterpreter::new(&NullLogger)
            .interpret_raw(ResponseEnvelope::new(200, r#"{"message": "x"}"#))
            .unwrap();
        assert_eq!(bytes.as_ref(), br#"{"message": "x"}"#);
    }

    #[test]
    fn raw_failure_with_message_uses_it() {
        let err = ResponseInterpreter::new(&NullLogger)
            .interpret_raw(ResponseEnvelope::new(404, r#"{"message": "Not Found"}"#))
            .unwrap_err();
        assert_eq!(err.message(), "Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn raw_failure_with_null_message_uses_generic_text() {
        let err = ResponseInterpreter::new(&NullLogger)
            .interpret_raw(ResponseEnvelope::new(404, r#"{"message": null}"#))
            .unwrap_err();
        assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn raw_failure_without_message_reports_status_and_body() {
        let err = ResponseInterpreter::new(&NullLogger)
            .interpret_raw(ResponseEnvelope::new(503, "Service Unavailable"))
            .unwrap_err();
        assert_eq!(err.code(), INVALID_RESPONSE);
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.message(),
            "API call returned a 503 code. Response body was 'Service Unavailable'."
        );
    }
}
