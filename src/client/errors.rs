use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when neither the server nor the transport explains a failure.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// The single error shape callers of the request client ever see.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct NormalizedError {
    pub message: String,
    /// HTTP status, absent when no response was received.
    pub code: Option<u16>,
}

impl NormalizedError {
    pub fn new(message: impl Into<String>, code: Option<u16>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// Builds a normalized error from whatever the failure provided.
///
/// The server message wins, then the transport message, then
/// [`FALLBACK_MESSAGE`]. Blank messages count as missing; the chosen message
/// is returned verbatim.
#[must_use]
pub fn normalize(
    server_message: Option<&str>,
    transport_message: Option<&str>,
    code: Option<u16>,
) -> NormalizedError {
    let message = [server_message, transport_message]
        .into_iter()
        .flatten()
        .find(|message| !message.trim().is_empty())
        .unwrap_or(FALLBACK_MESSAGE);

    NormalizedError::new(message, code)
}

/// Pulls the `message` field out of a JSON error body.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Transport-level text for a response with a failing status.
pub(crate) fn status_message(status: u16) -> String {
    format!("Request failed with status code {status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_takes_priority() {
        let err = normalize(
            Some("Invalid credentials"),
            Some("Request failed with status code 401"),
            Some(401),
        );
        assert_eq!(err, NormalizedError::new("Invalid credentials", Some(401)));
    }

    #[test]
    fn transport_message_used_without_server_message() {
        let err = normalize(None, Some("connection refused"), None);
        assert_eq!(err.message, "connection refused");
        assert_eq!(err.code, None);
    }

    #[test]
    fn blank_server_message_falls_through() {
        let err = normalize(Some("   "), Some("Request failed with status code 500"), Some(500));
        assert_eq!(err.message, "Request failed with status code 500");
        assert_eq!(err.code, Some(500));
    }

    #[test]
    fn server_message_is_kept_verbatim() {
        let err = normalize(Some("  Invalid credentials\n"), None, Some(401));
        assert_eq!(err.message, "  Invalid credentials\n");
    }

    #[test]
    fn fallback_when_nothing_is_known() {
        assert_eq!(normalize(None, None, None).message, FALLBACK_MESSAGE);
        assert_eq!(normalize(Some(""), Some(""), Some(502)).message, FALLBACK_MESSAGE);
        assert_eq!(normalize(None, None, Some(502)).code, Some(502));
    }

    #[test]
    fn server_message_reads_json_body() {
        assert_eq!(
            server_message(r#"{"message":"Email already used"}"#).as_deref(),
            Some("Email already used")
        );
        assert_eq!(server_message(r#"{"error":"nope"}"#), None);
        assert_eq!(server_message(r#"{"message":42}"#), None);
        assert_eq!(server_message("<html>Bad Gateway</html>"), None);
        assert_eq!(server_message(""), None);
    }

    #[test]
    fn display_is_the_message() {
        let err = NormalizedError::new("Invalid credentials", Some(401));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn serializes_as_message_and_code() {
        let json = serde_json::to_value(NormalizedError::new("boom", None)).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({ "message": "boom", "code": null }))
        );
    }
}
