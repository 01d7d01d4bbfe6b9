//! Web utils
use std::fmt;
use std::time::Duration;

use awc::http::header;
use awc::{ClientRequest, SendClientRequest};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use openssl::ssl::{SslConnector, SslMethod, SslVerifyMode};
use serde::{de::DeserializeOwned, Serialize};
use url::form_urlencoded;

use crate::error::Error;
use crate::model::ErrorMessage;
use crate::retry::Retry;
use crate::Result;

/// Blocking invocations may legitimately run for a while.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Action records embed their own source code.
const MAX_RESPONSE_SIZE: usize = 8 * 1024 * 1024;

/// Basic auth credentials parsed from a `key:secret` token.
#[derive(Clone)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Splits a `key:secret` token. Fails when the token does not consist of
    /// exactly two non-empty halves separated by a single colon.
    pub fn from_token(token: &str) -> Result<Credentials> {
        let (key, secret) = match token.split_once(':') {
            Some(pair) => pair,
            None => return Err(Error::credentials("expected a key:secret token, found no colon")),
        };
        if key.is_empty() || secret.is_empty() {
            return Err(Error::credentials("empty key or secret in key:secret token"));
        }
        if secret.contains(':') {
            return Err(Error::credentials("more than one colon in key:secret token"));
        }
        Ok(Credentials {
            key: key.to_string(),
            secret: secret.to_string(),
        })
    }

    fn basic_header(&self) -> String {
        format!(
            "Basic {}",
            BASE64.encode(format!("{}:{}", self.key, self.secret))
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"***")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum Auth {
    Basic(Credentials),
}

/// Convenient wrapper for the [`awc::Client`] with builder.
#[derive(Clone)]
pub struct WebClient {
    awc: awc::Client,
    retry: Option<Retry>,
}

pub struct WebRequest<T> {
    inner_request: T,
    url: String,
}

impl WebClient {
    pub fn builder() -> WebClientBuilder {
        WebClientBuilder::default()
    }

    pub fn get(&self, url: &str) -> WebRequest<ClientRequest> {
        log::debug!("doing get on {}", url);
        WebRequest {
            inner_request: self.awc.get(url),
            url: url.to_string(),
        }
    }

    pub fn post(&self, url: &str) -> WebRequest<ClientRequest> {
        log::debug!("doing post on {}", url);
        WebRequest {
            inner_request: self.awc.post(url),
            url: url.to_string(),
        }
    }

    pub fn put(&self, url: &str) -> WebRequest<ClientRequest> {
        log::debug!("doing put on {}", url);
        WebRequest {
            inner_request: self.awc.put(url),
            url: url.to_string(),
        }
    }

    pub fn delete(&self, url: &str) -> WebRequest<ClientRequest> {
        log::debug!("doing delete on {}", url);
        WebRequest {
            inner_request: self.awc.delete(url),
            url: url.to_string(),
        }
    }

    /// GET + JSON decode, re-issuing the request per the configured retry
    /// policy. Only ever used for idempotent reads; mutations go through the
    /// single-shot request path.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut retry = self.retry.clone().unwrap_or_else(|| Retry::new(0));
        loop {
            match self.get(url).send().json().await {
                Ok(value) => return Ok(value),
                Err(e) => match retry.delay(&e) {
                    Some(delay) => {
                        log::warn!("retrying {} in {:?} after: {}", url, delay, e);
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(e),
                },
            }
        }
    }
}

impl WebRequest<ClientRequest> {
    pub fn send_json<T: Serialize>(self, value: &T) -> WebRequest<SendClientRequest> {
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(payload) = serde_json::to_string(value) {
                log::trace!("request payload: {}", payload);
            }
        }
        WebRequest {
            inner_request: self.inner_request.send_json(value),
            url: self.url,
        }
    }

    pub fn send(self) -> WebRequest<SendClientRequest> {
        WebRequest {
            inner_request: self.inner_request.send(),
            url: self.url,
        }
    }
}

impl WebRequest<SendClientRequest> {
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.url;
        let mut response = self
            .inner_request
            .await
            .map_err(|e| Error::from((e, url.clone())))?;
        let status = response.status();
        let body = response.body().limit(MAX_RESPONSE_SIZE).await?;
        log::debug!("{} response from {}", status, url);
        if status.is_success() {
            log::trace!("response body: {}", String::from_utf8_lossy(&body));
            Ok(serde_json::from_slice(&body)?)
        } else {
            // Error bodies without an `error` field (e.g. a full activation
            // record on a failed blocking invocation) keep their raw text.
            let msg = serde_json::from_slice::<ErrorMessage>(&body)
                .ok()
                .filter(|msg| msg.error.is_some())
                .unwrap_or_else(|| ErrorMessage::new(String::from_utf8_lossy(&body).into_owned()));
            Err(Error::from((status, url, msg)))
        }
    }
}

#[derive(Clone, Debug)]
pub struct WebClientBuilder {
    pub(crate) auth: Option<Auth>,
    pub(crate) timeout: Duration,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) retry: Option<Retry>,
}

impl WebClientBuilder {
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Parses and installs a `key:secret` token; fails before any network I/O
    /// when the token is malformed.
    pub fn auth_token(self, token: &str) -> Result<Self> {
        Ok(self.auth(Auth::Basic(Credentials::from_token(token)?)))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables TLS peer verification, e.g. for self-signed local deployments.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Retry policy for idempotent GET requests; off unless configured.
    pub fn retry(mut self, retry: Retry) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn build(self) -> Result<WebClient> {
        let mut builder = awc::Client::builder().timeout(self.timeout);

        if let Some(auth) = &self.auth {
            builder = match auth {
                Auth::Basic(credentials) => builder
                    .add_default_header((header::AUTHORIZATION, credentials.basic_header())),
            };
        }

        let awc = if self.accept_invalid_certs {
            let mut ssl = SslConnector::builder(SslMethod::tls())?;
            ssl.set_verify(SslVerifyMode::NONE);
            builder
                .connector(awc::Connector::new().openssl(ssl.build()))
                .finish()
        } else {
            builder.finish()
        };

        Ok(WebClient {
            awc,
            retry: self.retry,
        })
    }
}

impl Default for WebClientBuilder {
    fn default() -> Self {
        WebClientBuilder {
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
            retry: None,
        }
    }
}

/// Builder for the query part of the URLs.
pub struct QueryParamsBuilder<'a> {
    serializer: form_urlencoded::Serializer<'a, String>,
}

impl<'a> QueryParamsBuilder<'a> {
    pub fn new() -> Self {
        let serializer = form_urlencoded::Serializer::new("".into());
        QueryParamsBuilder { serializer }
    }

    /// Appends `name=value` for `Some` values and skips `None` entirely.
    /// Values are rendered with their `Display` impl; pass composite values
    /// as `serde_json::Value`, whose `Display` is its JSON encoding.
    pub fn put<N: ToString, V: ToString>(mut self, name: N, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.serializer
                .append_pair(name.to_string().as_str(), value.to_string().as_str());
        }
        self
    }

    pub fn build(mut self) -> String {
        self.serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parsed(query: &str) -> HashMap<String, String> {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn credentials_split_on_single_colon() {
        let credentials = Credentials::from_token("23bc46b1-71f6-4ed5-8c54:T0Nr0l4nd").unwrap();
        assert_eq!(
            credentials.basic_header(),
            format!("Basic {}", BASE64.encode("23bc46b1-71f6-4ed5-8c54:T0Nr0l4nd"))
        );
    }

    #[test]
    fn colonless_token_is_rejected() {
        let err = Credentials::from_token("no-separator-here").unwrap_err();
        assert!(matches!(err, Error::CredentialFormatError { .. }));
    }

    #[test]
    fn empty_halves_are_rejected() {
        assert!(Credentials::from_token(":secret").is_err());
        assert!(Credentials::from_token("key:").is_err());
        assert!(Credentials::from_token(":").is_err());
    }

    #[test]
    fn double_colon_is_rejected() {
        let err = Credentials::from_token("key:sec:ret").unwrap_err();
        assert!(matches!(err, Error::CredentialFormatError { .. }));
    }

    #[test]
    fn debug_redacts_the_secret() {
        let credentials = Credentials::from_token("whisk-user:hunter2").unwrap();
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("whisk-user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn query_skips_none_values() {
        let query = QueryParamsBuilder::new()
            .put("skip", Some(0))
            .put("limit", None::<u64>)
            .put("blocking", Some(true))
            .build();
        assert_eq!(query, "skip=0&blocking=true");
    }

    #[test]
    fn query_round_trips_independent_of_insertion_order() {
        let forward = QueryParamsBuilder::new()
            .put("skip", Some(10))
            .put("limit", Some(50))
            .build();
        let backward = QueryParamsBuilder::new()
            .put("limit", Some(50))
            .put("skip", Some(10))
            .build();
        assert_eq!(parsed(&forward), parsed(&backward));
    }

    #[test]
    fn composite_values_round_trip_as_json() {
        let value = serde_json::json!({"name": "Wendel", "count": 2});
        let query = QueryParamsBuilder::new().put("payload", Some(&value)).build();
        let parsed = parsed(&query);
        let round_tripped: serde_json::Value = serde_json::from_str(&parsed["payload"]).unwrap();
        assert_eq!(round_tripped, value);
    }
}
