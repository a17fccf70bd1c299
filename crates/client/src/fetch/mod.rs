//! HTTP GET for the directory and places clients.
//!
//! Clients depend on the [`Fetcher`] trait only; [`FetchClient`] is the
//! network implementation. One request at a time, no retries, and any
//! non-2xx status is an error.

pub mod url;

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use ::url::Url;

pub use self::url::{UrlError, canonicalize, resolve_href};

use nps_core::{AppConfig, Error};

/// GET capability used by every client.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and return the body as text.
    async fn get_text(&self, url: &str) -> Result<String, Error>;

    /// GET `url` with `query` appended and decode the body as JSON.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, Error>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        (**self).get_text(url).await
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        (**self).get_json(url, query).await
    }
}

/// Limits and identity for [`FetchClient`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Operator address for the `From` header
    pub contact: Option<String>,
    /// Largest body accepted, checked against `Content-Length` and again after reading
    pub max_bytes: usize,
    /// Whole-request timeout
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            contact: config.contact.clone(),
            max_bytes: config.max_bytes,
            timeout: config.timeout(),
            max_redirects: MAX_REDIRECTS,
        }
    }
}

const MAX_REDIRECTS: usize = 5;
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_JSON: &str = "application/json";

/// reqwest-backed [`Fetcher`].
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut headers = header::HeaderMap::new();
        if let Some(contact) = &config.contact {
            let value = header::HeaderValue::from_str(contact)
                .map_err(|e| Error::InvalidInput(format!("invalid contact header: {e}")))?;
            headers.insert(header::FROM, value);
        }

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpError(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Send a GET and reject error statuses and oversized `Content-Length`.
    async fn send(&self, url_str: &str, accept: &str, query: &[(&str, String)]) -> Result<(Url, Response), Error> {
        let url = canonicalize(url_str).map_err(|e| Error::InvalidUrl(format!("{url_str}: {e}")))?;

        let mut request = self.http.get(url.as_str()).header(header::ACCEPT, accept);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {} for {url}", status.as_u16())));
        }

        if let Some(len) = response.content_length() {
            self.check_size(&url, len)?;
        }

        Ok((url, response))
    }

    fn check_size(&self, url: &Url, len: u64) -> Result<(), Error> {
        let limit = self.config.max_bytes;
        if len > limit as u64 {
            return Err(Error::FetchTooLarge(format!("{url}: {len} bytes exceeds {limit}")));
        }
        Ok(())
    }
}

#[async_trait]
impl Fetcher for FetchClient {
    /// Decoded with the charset named in `Content-Type`, UTF-8 otherwise.
    async fn get_text(&self, url: &str) -> Result<String, Error> {
        let started = Instant::now();
        let (url, response) = self.send(url, ACCEPT_HTML, &[]).await?;

        let text = response.text().await.map_err(transport_error)?;
        self.check_size(&url, text.len() as u64)?;

        tracing::debug!(%url, bytes = text.len(), elapsed_ms = started.elapsed().as_millis() as u64, "fetched page");
        Ok(text)
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, Error> {
        let started = Instant::now();
        let (url, response) = self.send(url, ACCEPT_JSON, query).await?;

        let body = response.bytes().await.map_err(transport_error)?;
        self.check_size(&url, body.len() as u64)?;

        tracing::debug!(%url, bytes = body.len(), elapsed_ms = started.elapsed().as_millis() as u64, "fetched json");
        serde_json::from_slice(&body).map_err(|e| Error::Parse(format!("invalid JSON from {url}: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() { Error::FetchTimeout(err.to_string()) } else { Error::HttpError(format!("network error: {err}")) }
}
