//! Remote dataset endpoint.
//!
//! The [`RemoteSource`] trait is the network boundary of the whole system:
//! staleness probes and archive downloads go through it and nothing else.

use reqwest::blocking::Client;
use reqwest::header::{ETAG, HeaderMap, HeaderName, LAST_MODIFIED, USER_AGENT};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};

/// User agent string for dataset requests.
const USER_AGENT_VALUE: &str = concat!("opl-lookup/", env!("CARGO_PKG_VERSION"));

/// A downloaded archive and the fingerprint of the response that carried it.
#[derive(Debug, Clone)]
pub struct FetchedArchive {
    pub data: Vec<u8>,
    pub fingerprint: String,
}

/// Source of the results archive.
pub trait RemoteSource: Send + Sync {
    /// Fingerprint of the current remote content, from cache-validation
    /// headers only (no body transfer).
    fn fingerprint(&self) -> Result<String>;

    /// Download the full archive.
    fn fetch(&self) -> Result<FetchedArchive>;
}

/// Compute a staleness fingerprint from `ETag` and `Last-Modified` values.
///
/// # Examples
///
/// ```
/// use opl_store::fingerprint;
///
/// let a = fingerprint("\"abc\"", "Tue, 01 Oct 2024 00:00:00 GMT");
/// let b = fingerprint("\"abc\"", "Wed, 02 Oct 2024 00:00:00 GMT");
/// assert_ne!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn fingerprint(etag: &str, last_modified: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(etag.as_bytes());
    hasher.update(b"_");
    hasher.update(last_modified.as_bytes());
    hex::encode(hasher.finalize())
}

fn fingerprint_from_headers(headers: &HeaderMap) -> String {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    };
    fingerprint(header(ETAG), header(LAST_MODIFIED))
}

/// HTTP implementation of [`RemoteSource`].
pub struct HttpSource {
    client: Client,
    url: String,
    probe_timeout: std::time::Duration,
}

impl HttpSource {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: config.source_url.clone(),
            probe_timeout: config.probe_timeout(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RemoteSource for HttpSource {
    fn fingerprint(&self) -> Result<String> {
        debug!(url = %self.url, "Probing dataset headers");

        let response = self
            .client
            .head(&self.url)
            .timeout(self.probe_timeout)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Network(format!(
                "HEAD {} returned {}",
                self.url,
                response.status()
            )));
        }

        Ok(fingerprint_from_headers(response.headers()))
    }

    fn fetch(&self) -> Result<FetchedArchive> {
        debug!(url = %self.url, "Downloading dataset archive");

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Network(format!(
                "GET {} returned {}",
                self.url,
                response.status()
            )));
        }

        let fingerprint = fingerprint_from_headers(response.headers());
        let data = response
            .bytes()
            .map_err(|e| StoreError::Network(e.to_string()))?
            .to_vec();

        debug!(bytes = data.len(), "Archive downloaded");
        Ok(FetchedArchive { data, fingerprint })
    }
}
