//! Request signing.
//!
//! Query APIs authenticate each request with signature parameters added to
//! the query string. [`SignatureV2`] implements AWS Signature Version 2
//! with HMAC-SHA256:
//!
//! ```text
//! StringToSign = HTTPMethod + "\n" + Host + "\n" + Path + "\n" + CanonicalQuery
//! Signature    = Base64(HMAC-SHA256(SecretKey, StringToSign))
//! ```
//!
//! where `CanonicalQuery` is every parameter, RFC 3986 encoded, sorted by
//! encoded name.

use std::env;
use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;

use crate::error::QueryError;
use crate::params::Params;

type HmacSha256 = Hmac<Sha256>;

/// Everything except the RFC 3986 unreserved characters.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Adds signature parameters to a request before it is sent.
pub trait Signer: Send + Sync {
    /// Sign a request for `method host path` carrying `params`, in place.
    fn sign(
        &self,
        method: &str,
        path: &str,
        params: &mut Params,
        host: &str,
    ) -> Result<(), QueryError>;
}

/// Access key pair, optionally with a session token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
    token: Option<String>,
}

impl Credentials {
    /// Create credentials from an access key pair.
    pub fn new(access_key: &str, secret_key: &str) -> Self {
        Self {
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            token: None,
        }
    }

    /// Attach a session token, sent as `SecurityToken`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Load credentials from the standard environment variables.
    ///
    /// Reads `AWS_ACCESS_KEY_ID` (or `AWS_ACCESS_KEY`), `AWS_SECRET_ACCESS_KEY`
    /// (or `AWS_SECRET_KEY`) and the optional `AWS_SESSION_TOKEN`.
    pub fn from_env() -> Result<Self, QueryError> {
        let access_key = first_var(&["AWS_ACCESS_KEY_ID", "AWS_ACCESS_KEY"])
            .ok_or(QueryError::MissingCredentials("AWS_ACCESS_KEY_ID"))?;
        let secret_key = first_var(&["AWS_SECRET_ACCESS_KEY", "AWS_SECRET_KEY"])
            .ok_or(QueryError::MissingCredentials("AWS_SECRET_ACCESS_KEY"))?;

        let credentials = Self::new(&access_key, &secret_key);
        Ok(match first_var(&["AWS_SESSION_TOKEN"]) {
            Some(token) => credentials.with_token(&token),
            None => credentials,
        })
    }

    /// Access key id, sent as `AWSAccessKeyId`.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Session token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// AWS Signature Version 2 (HmacSHA256).
#[derive(Debug, Clone)]
pub struct SignatureV2 {
    credentials: Credentials,
}

impl SignatureV2 {
    /// Create a signer for `credentials`.
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl Signer for SignatureV2 {
    fn sign(
        &self,
        method: &str,
        path: &str,
        params: &mut Params,
        host: &str,
    ) -> Result<(), QueryError> {
        params.insert(
            "AWSAccessKeyId".to_string(),
            self.credentials.access_key().to_string(),
        );
        params.insert("SignatureVersion".to_string(), "2".to_string());
        params.insert("SignatureMethod".to_string(), "HmacSHA256".to_string());
        if let Some(token) = self.credentials.token() {
            params.insert("SecurityToken".to_string(), token.to_string());
        }

        let payload = string_to_sign(method, host, path, params);
        let mut mac = HmacSha256::new_from_slice(self.credentials.secret_key.as_bytes())?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        params.insert("Signature".to_string(), signature);
        Ok(())
    }
}

fn string_to_sign(method: &str, host: &str, path: &str, params: &Params) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        method,
        host,
        path,
        canonical_query_string(params)
    )
}

/// RFC 3986 encode a query component.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

/// Encode all parameters as `k=v` pairs joined by `&`, sorted by encoded name.
pub fn canonical_query_string(params: &Params) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}
