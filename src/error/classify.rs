//! Maps raw transport responses to typed errors.

use super::{ApiErrorKind, TransportError};
use crate::framework::transport::Response;
use tracing::warn;

/// Passes 2xx bodies through and classifies everything else.
///
/// The API reports failures as `{"error": {"message": ..., "type": ..., "param": ...}}`;
/// when the body has that shape its message is used, otherwise the raw body text.
pub fn classify(response: Response) -> Result<serde_json::Value, TransportError> {
    if (200..300).contains(&response.status) {
        return Ok(response.body);
    }

    let kind = ApiErrorKind::from_status(response.status);
    let message = error_message(&response.body);
    warn!(status = response.status, %kind, %message, "Request rejected");
    Err(TransportError::Status {
        status: response.status,
        kind,
        message,
    })
}

fn error_message(body: &serde_json::Value) -> String {
    let error = body.get("error");
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
        .or_else(|| error.and_then(serde_json::Value::as_str))
        .or_else(|| body.get("message").and_then(serde_json::Value::as_str));

    match (message, error.and_then(|e| e.get("param")).and_then(serde_json::Value::as_str)) {
        (Some(message), Some(param)) => format!("{message} (param: {param})"),
        (Some(message), None) => message.to_string(),
        (None, _) => match body {
            serde_json::Value::Null => "empty response body".to_string(),
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}
