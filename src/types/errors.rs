use thiserror::Error;

use super::permission::PermissionId;

// === PermissionError ===

/// Errors related to permission requests and the review queue.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// No request with the given ID is known to the store.
    #[error("Permission request not found: {0}")]
    UnknownRequest(PermissionId),
    /// A decision was submitted while no dialog is shown.
    #[error("No permission dialog is active")]
    NoActiveDialog,
    /// Database operation failed.
    #[error("Permission database error: {0}")]
    DatabaseError(String),
}

// === ChannelError ===

/// Errors related to the UI ↔ host message channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The receiving side of the channel has gone away.
    #[error("Channel closed")]
    Closed,
    /// The transport rejected the message.
    #[error("Channel transport error: {0}")]
    Transport(String),
}

// === CookieError ===

/// Errors reported by a session cookie store.
#[derive(Debug, Error)]
pub enum CookieError {
    /// The URL could not be used to query or remove cookies.
    #[error("Invalid cookie URL: {0}")]
    InvalidUrl(String),
    /// The underlying store failed.
    #[error("Cookie store error: {0}")]
    StoreError(String),
}

// === AnalysisError ===

/// Errors related to the local analysis service (link scoring, reports, explanations).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The request could not be sent or the service did not answer.
    #[error("Analysis service network error: {0}")]
    Network(String),
    /// The service answered with a non-success HTTP status.
    #[error("Analysis service returned status {0}")]
    Status(u16),
    /// The response body could not be parsed.
    #[error("Analysis response parse error: {0}")]
    Parse(String),
    /// A report for this panel is already being fetched.
    #[error("A security report request is already in flight")]
    Busy,
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => AnalysisError::Status(status.as_u16()),
            None if e.is_decode() => AnalysisError::Parse(e.to_string()),
            None => AnalysisError::Network(e.to_string()),
        }
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
