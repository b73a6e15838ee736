//! Error types for the Pi API client

use thiserror::Error;

/// Result type for Pi API operations
pub type Result<T> = std::result::Result<T, McpiError>;

/// Pi API error types
///
/// Every failure of a call surfaces as one of these variants. Nothing is
/// retried or reconnected internally.
#[derive(Debug, Error)]
pub enum McpiError {
    /// The stream connection could not be established
    #[error("Connect error: {0}")]
    ConnectError(String),

    /// Operation attempted while the connection is not open
    #[error("Not connected: {0}")]
    NotConnectedError(String),

    /// Writing a request line failed
    #[error("Send error: {reason} (payload: {payload:?})")]
    SendError { payload: String, reason: String },

    /// Reading a response line failed, or the peer went away mid-line
    #[error("Receive error: {0}")]
    ReceiveError(String),

    /// Response did not have the shape the call expects
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Server answered with its `Fail` sentinel
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Argument cannot be carried on a single protocol line
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Client configuration could not be read
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<serde_json::Error> for McpiError {
    fn from(err: serde_json::Error) -> Self {
        McpiError::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_error_carries_payload() {
        let err = McpiError::SendError {
            payload: "chat.post(hi)\n".into(),
            reason: "Broken pipe".into(),
        };
        let text = err.to_string();
        assert!(text.contains("Broken pipe"));
        assert!(text.contains("chat.post(hi)"));
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u16>("nope").unwrap_err();
        assert!(matches!(McpiError::from(err), McpiError::ConfigError(_)));
    }
}
