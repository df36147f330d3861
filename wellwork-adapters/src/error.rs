//! Error types for adapters.

use thiserror::Error;
use wellwork_core::UploadError;

/// Errors raised by the uplink, the network gate and the sensor adapters.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The configured endpoint is not a usable URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse input.
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    /// The wait was interrupted by a stop signal.
    #[error("Cancelled")]
    Cancelled,

    /// The network gate gave up.
    #[error("Network not reachable after {0} attempts")]
    AttemptsExhausted(u32),
}

#[cfg(feature = "thingspeak")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}

impl From<AdapterError> for UploadError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Timeout => UploadError::Timeout,
            other => UploadError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_upload_timeout() {
        assert_eq!(UploadError::from(AdapterError::Timeout), UploadError::Timeout);
    }

    #[test]
    fn connection_maps_to_transport() {
        let err = UploadError::from(AdapterError::Connection("refused".to_string()));
        assert_eq!(
            err,
            UploadError::Transport("Connection failed: refused".to_string())
        );
    }

    #[test]
    fn parse_error_names_its_input() {
        let err = AdapterError::Parse {
            what: "replay line 3".to_string(),
            message: "expected value".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse replay line 3: expected value");
    }
}
