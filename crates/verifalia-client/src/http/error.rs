/*
[INPUT]:  Error sources (HTTP, endpoint failover, auth, serialization, cancellation)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// A single failed attempt against one base endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    pub url: String,
    pub message: String,
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.url, self.message)
    }
}

/// Main error type for the Verifalia client
#[derive(Error, Debug)]
pub enum VerifaliaError {
    /// HTTP client failed outside of an endpoint attempt
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or invalid configuration / credential material
    #[error("Configuration error: {0}")]
    Config(String),

    /// Every configured base endpoint failed with a connectivity-class error
    #[error("All the base URIs are unreachable.{}", format_failures(.failures))]
    AllEndpointsFailed { failures: Vec<EndpointFailure> },

    /// The service rejected the credentials (HTTP 401 / 403)
    #[error("Can't authenticate to Verifalia using the provided credential (HTTP status code: {status})")]
    Authentication { status: u16 },

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A response field could not be decoded
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The service answered with a status the operation does not handle
    #[error("Unexpected HTTP status {status} while {operation}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// No explicit content type and none could be inferred from the file name
    #[error("Cannot guess the content type for the provided file {file_name}, please specify it through the file options")]
    UnresolvedContentType { file_name: String },

    /// A job being waited on was deleted or expired on the server
    #[error("Validation job {id} not found (deleted or expired)")]
    JobNotFound { id: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Local I/O failed (reading an input file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_failures(failures: &[EndpointFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n{failure}"))
        .collect()
}

impl VerifaliaError {
    /// Check if the error is a connectivity-class failure worth retrying later
    pub fn is_retryable(&self) -> bool {
        match self {
            VerifaliaError::Http(err) => err.is_connect() || err.is_timeout(),
            VerifaliaError::AllEndpointsFailed { .. } => true,
            VerifaliaError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, VerifaliaError::Authentication { .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            VerifaliaError::Authentication { status }
            | VerifaliaError::UnexpectedStatus { status, .. } => Some(*status),
            VerifaliaError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Create an unexpected-status error from a status code and response body
    pub fn unexpected_status(
        operation: &'static str,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        VerifaliaError::UnexpectedStatus {
            operation,
            status: status.as_u16(),
            body: body.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        VerifaliaError::Config(message.into())
    }
}

/// Result type alias for Verifalia operations
pub type Result<T> = std::result::Result<T, VerifaliaError>;
