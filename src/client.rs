//! HTTP client wrapper for query requests.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use url::Url;

use crate::error::QueryError;

/// Default timeout for query requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on a response body (16 MiB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Status and body of a completed GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Blocking HTTP client used to send signed query requests.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    max_body_size: usize,
}

impl HttpClient {
    /// Create a new client with the specified timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(false)
            .build()?;
        Ok(Self {
            inner,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        })
    }

    /// Create a new client with the default timeout.
    pub fn with_default_timeout() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_TIMEOUT)
    }

    /// Limit response bodies to `max` bytes.
    pub fn with_max_body_size(mut self, max: usize) -> Self {
        self.max_body_size = max;
        self
    }

    /// Issue a single GET and read the whole body.
    ///
    /// The response is dropped before returning, whatever the status.
    pub fn get(&self, url: &Url) -> Result<HttpResponse, QueryError> {
        let response = self.inner.get(url.as_str()).send()?;
        let status = response.status();
        let body = read_body_limited(response, self.max_body_size)?;
        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

/// Read a response body, failing once it grows past `max_size` bytes.
///
/// A `Content-Length` above the limit is rejected before any of the body
/// is read.
fn read_body_limited(response: Response, max_size: usize) -> Result<Vec<u8>, QueryError> {
    if let Some(content_length) = response.content_length() {
        if content_length > max_size as u64 {
            return Err(QueryError::TooLarge(content_length as usize, max_size));
        }
    }

    let capacity = response
        .content_length()
        .map(|cl| (cl as usize).min(max_size))
        .unwrap_or(max_size.min(8192));
    let mut body = Vec::with_capacity(capacity);

    // One byte past the limit is enough to tell an oversized body apart.
    let mut limited = response.take(max_size as u64 + 1);
    limited.read_to_end(&mut body)?;
    if body.len() > max_size {
        return Err(QueryError::TooLarge(body.len(), max_size));
    }
    Ok(body)
}
