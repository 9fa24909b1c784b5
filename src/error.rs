//! Error types for the Hack or Snooze client.
//!
//! Uses thiserror for ergonomic error definition.

use thiserror::Error;

/// Errors that can occur when talking to the Hack or Snooze API.
///
/// Every operation lets failures propagate unmodified to its caller; there is
/// no retry or recovery at this layer. The one exception is
/// [`User::restore_session`](crate::User::restore_session), which traps all of
/// these and degrades to `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport or connectivity failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The service rejected the credentials or session token.
    #[error("Authentication rejected: {0}")]
    Auth(String),

    /// The service rejected the request payload (e.g. duplicate username,
    /// weak password, malformed story fields).
    #[error("Invalid request: {0}")]
    Validation(String),

    /// The requested identifier is unknown to the service.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A story URL that cannot be parsed as an absolute URL with a host.
    #[error("Malformed story URL: {0}")]
    MalformedUrl(String),

    /// Any other non-success response from the service.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A success response whose body failed to deserialize.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, Error>;
