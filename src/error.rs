//! Error types for query API operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when calling a query API.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The service answered with a non-200 status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// HTTP request error (connect, DNS, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response body did not match the expected XML shape.
    #[error("xml: {0}")]
    Decode(#[from] quick_xml::DeError),

    /// The signing key was rejected by the MAC.
    #[error("signing failed: {0}")]
    Signing(#[from] hmac::digest::InvalidLength),

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// The configured endpoint has no host to sign against.
    #[error("endpoint has no host: {0}")]
    MissingHost(String),

    /// The region name is not in the endpoint catalog.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// An account number that is not 12 digits.
    #[error("invalid account number: {0:?} (expected 12 digits)")]
    InvalidAccount(String),

    /// A response body exceeded the size limit.
    #[error("response too large: {0} bytes (max {1})")]
    TooLarge(usize, usize),

    /// Reading the response body failed.
    #[error("reading response body: {0}")]
    Body(#[from] std::io::Error),

    /// No credentials were found in the environment.
    #[error("missing credentials: {0} not set")]
    MissingCredentials(&'static str),
}

/// An error reported by the service in its XML error envelope.
///
/// Only the first `<Error>` element of the envelope is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceError {
    status_code: u16,
    code: String,
    message: String,
    request_id: String,
}

impl ServiceError {
    pub(crate) fn new(status_code: u16, code: String, message: String, request_id: String) -> Self {
        Self {
            status_code,
            code,
            message,
            request_id,
        }
    }

    /// HTTP status code (400, 403, 500, ...).
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Machine-readable error code ("InvalidParameterValue", ...). May be empty.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Request id reported by the service.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.code)
        }
    }
}

impl std::error::Error for ServiceError {}
