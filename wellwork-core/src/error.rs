//! Error types for the monitoring core.

use thiserror::Error;

/// Failure to obtain a temperature/humidity reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The sensor answered but had no reading (a NaN sample).
    #[error("sensor reading unavailable")]
    Unavailable,

    /// The sensor bus or driver failed.
    #[error("sensor bus error: {0}")]
    Bus(String),
}

/// Failure to deliver a telemetry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No network connection; the upload was not attempted.
    #[error("network unavailable")]
    Offline,

    /// The endpoint answered with a non-success status.
    #[error("endpoint rejected upload with status {status}")]
    Rejected { status: u16 },

    /// The request could not be sent or the response could not be read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The request did not complete in time.
    #[error("upload timed out")]
    Timeout,

    /// The point carried values the endpoint cannot accept.
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),
}

/// Invalid monitor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("seconds per virtual hour must be greater than zero")]
    ZeroHourLength,

    #[error("start hour {0} is outside 0..24")]
    StartHourOutOfRange(u8),

    #[error("cycle period must be greater than zero")]
    ZeroCadence,
}
