//! HTTP retrieval for manifests and image assets.
//!
//! The [`Fetcher`] trait is the one seam between gallery logic and the
//! network. The production implementation is [`HttpFetcher`] — a blocking
//! `reqwest` client — so everything above it (manifest loading, archive
//! assembly) can be exercised in tests with an in-memory fetcher.
//!
//! Every request is sent with `Cache-Control: no-store`. Galleries are
//! re-published in place after re-edits, so a stale cached manifest would
//! show clients an outdated image list.

use crate::config::FetchConfig;
use reqwest::blocking::Client;
use reqwest::header;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { url: Url, status: u16 },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Trait for fetching a resource as raw bytes.
///
/// Implementations must treat non-2xx responses as errors — callers rely on
/// a returned `Ok` meaning the body is the complete resource.
pub trait Fetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Production fetcher backed by a blocking `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client from config. A timeout of zero disables the request
    /// timeout entirely and lets requests wait unbounded.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(header::CACHE_CONTROL, "no-store")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// Normalize a user-supplied gallery address into a base URL.
///
/// `Url::join` replaces the last path segment when the base has no trailing
/// slash, so `https://x/c/slug` would resolve `manifest.json` as a sibling
/// of `slug`. Appending the slash keeps relative resolution inside the
/// gallery directory.
pub fn gallery_base(address: &str) -> Result<Url, FetchError> {
    if address.ends_with('/') {
        Ok(Url::parse(address)?)
    } else {
        Ok(Url::parse(&format!("{address}/"))?)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory fetcher for tests. Responds from a URL → body map and
    /// records every requested URL in order.
    #[derive(Default)]
    pub struct MemoryFetcher {
        responses: HashMap<String, Result<Vec<u8>, u16>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_body(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(url.to_string(), Ok(body.into()));
            self
        }

        pub fn with_status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.to_string(), Err(status));
            self
        }
    }

    impl Fetcher for MemoryFetcher {
        fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            match self.responses.get(url.as_str()) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.clone(),
                    status: *status,
                }),
                None => Err(FetchError::Status {
                    url: url.clone(),
                    status: 404,
                }),
            }
        }
    }

    #[test]
    fn gallery_base_appends_trailing_slash() {
        let base = gallery_base("https://example.com/c/slug").unwrap();
        assert_eq!(base.as_str(), "https://example.com/c/slug/");
    }

    #[test]
    fn gallery_base_keeps_existing_slash() {
        let base = gallery_base("https://example.com/c/slug/").unwrap();
        assert_eq!(base.as_str(), "https://example.com/c/slug/");
    }

    #[test]
    fn gallery_base_rejects_garbage() {
        assert!(gallery_base("not a url").is_err());
    }

    #[test]
    fn base_resolves_manifest_inside_gallery() {
        let base = gallery_base("https://example.com/c/slug").unwrap();
        let manifest = base.join("manifest.json").unwrap();
        assert_eq!(manifest.as_str(), "https://example.com/c/slug/manifest.json");
    }

    #[test]
    fn memory_fetcher_records_requests() {
        let fetcher = MemoryFetcher::new().with_body("https://x/a.jpg", b"bytes".to_vec());
        let url = Url::parse("https://x/a.jpg").unwrap();
        assert_eq!(fetcher.fetch(&url).unwrap(), b"bytes");
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["https://x/a.jpg".to_string()]
        );
    }

    #[test]
    fn memory_fetcher_surfaces_status() {
        let fetcher = MemoryFetcher::new().with_status("https://x/b.jpg", 500);
        let url = Url::parse("https://x/b.jpg").unwrap();
        let err = fetcher.fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }
}
