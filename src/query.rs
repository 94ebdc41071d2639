//! Signed query request dispatching.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, trace};
use reqwest::StatusCode;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::{HttpClient, DEFAULT_MAX_BODY_SIZE};
use crate::error::{QueryError, ServiceError};
use crate::params::Params;
use crate::region::Region;
use crate::service::Service;
use crate::signing::{canonical_query_string, Signer};

/// Source of the `Timestamp` parameter.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The system clock.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Signed query client for one service in one region.
#[derive(Clone)]
pub struct QueryApi {
    service: Service,
    region: Region,
    signer: Arc<dyn Signer>,
    clock: Clock,
    http: HttpClient,
    max_body_size: usize,
}

impl QueryApi {
    /// Create a client for `service` in `region` using the system clock.
    pub fn new(
        service: Service,
        region: Region,
        signer: Arc<dyn Signer>,
    ) -> Result<Self, QueryError> {
        Ok(Self {
            service,
            region,
            signer,
            clock: system_clock(),
            http: HttpClient::with_default_timeout()?,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        })
    }

    /// Replace the time source used for `Timestamp`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the HTTP client with one using `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, QueryError> {
        self.http = HttpClient::new(timeout)?.with_max_body_size(self.max_body_size);
        Ok(self)
    }

    /// Limit response bodies to `max` bytes.
    pub fn with_max_body_size(mut self, max: usize) -> Self {
        self.max_body_size = max;
        self.http = self.http.with_max_body_size(max);
        self
    }

    /// The region requests are sent to.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Sign `params`, send them as a GET and decode the XML response into `T`.
    ///
    /// # Errors
    ///
    /// - `QueryError::Endpoint` / `QueryError::MissingHost` if the region
    ///   endpoint is unusable; nothing is sent in that case.
    /// - `QueryError::Transport` if the request cannot be completed.
    /// - `QueryError::TooLarge` if the body exceeds the size limit.
    /// - `QueryError::Service` for any status other than 200.
    /// - `QueryError::Decode` if a 200 body does not decode into `T`.
    pub fn query<T: DeserializeOwned>(&self, mut params: Params) -> Result<T, QueryError> {
        params.insert(
            "Version".to_string(),
            self.service.api_version().to_string(),
        );
        params.insert("Timestamp".to_string(), timestamp((self.clock)()));

        let mut endpoint = Url::parse(self.region.endpoint(self.service))?;
        if endpoint.path().is_empty() {
            endpoint.set_path("/");
        }
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(QueryError::MissingHost(endpoint.to_string())),
        };

        let path = endpoint.path().to_string();
        self.signer.sign("GET", &path, &mut params, &host)?;
        endpoint.set_query(Some(&canonical_query_string(&params)));

        let action = params.get("Action").map(String::as_str).unwrap_or_default();
        debug!("{} {} -> {}", self.service, action, host);
        trace!("GET {}", endpoint);

        let response = self.http.get(&endpoint)?;
        debug!("{} {} <- {}", self.service, action, response.status);
        trace!("response body: {}", response.body);

        if response.status != StatusCode::OK {
            return Err(build_error(response.status, &response.body).into());
        }
        Ok(quick_xml::de::from_str(&response.body)?)
    }
}

impl fmt::Debug for QueryApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryApi")
            .field("service", &self.service)
            .field("region", &self.region)
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

/// RFC 3339, UTC, whole seconds: `2013-05-15T10:00:00Z`.
fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Fields captured from an error envelope.
#[derive(Debug, Default)]
struct ErrorFields {
    code: String,
    message: String,
    request_id: String,
}

/// Scan an error envelope for the first `<Error>` and the request id.
///
/// Accepts both the `<Errors><Error>` and the bare `<Error>` layouts, and
/// `RequestID` or `RequestId`. Scanning stops at the first malformed token;
/// whatever was captured before it is kept.
fn scan_error_body(body: &str) -> ErrorFields {
    let mut fields = ErrorFields::default();
    let mut reader = Reader::from_str(body);
    reader.trim_text(true);

    let mut open: Vec<String> = Vec::new();
    let mut first_error_done = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                open.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"Error" {
                    first_error_done = true;
                }
                open.pop();
            }
            Ok(Event::Text(t)) => {
                let text = match t.unescape() {
                    Ok(text) => text,
                    Err(e) => {
                        trace!("error body: stopped at {}", e);
                        break;
                    }
                };
                let (Some(current), parent) = (open.last(), open.iter().rev().nth(1)) else {
                    continue;
                };
                let in_error = parent.map(String::as_str) == Some("Error");
                match current.as_str() {
                    "Code" if in_error && !first_error_done => fields.code.push_str(&text),
                    "Message" if in_error && !first_error_done => fields.message.push_str(&text),
                    "RequestID" | "RequestId" if fields.request_id.is_empty() => {
                        fields.request_id = text.into_owned();
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                trace!("error body: stopped at {}", e);
                break;
            }
        }
    }
    fields
}

/// Build a `ServiceError` from a non-200 response.
///
/// Fields that could not be read from the body stay empty; the status line
/// stands in for a missing message.
fn build_error(status: StatusCode, body: &str) -> ServiceError {
    let ErrorFields {
        code,
        message,
        request_id,
    } = scan_error_body(body);

    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };

    ServiceError::new(status.as_u16(), code, message, request_id)
}
