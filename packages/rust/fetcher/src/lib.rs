//! HTTP collaborators for the extraction core.
//!
//! [`WikiClient`] exposes the two operations the pipeline needs from the
//! network: fetch a wiki page's HTML by title, and fetch a binary image
//! asset. Fetching is sequential and best-effort — a failed fetch is
//! fatal only for the entity being scraped; the batch driver decides
//! whether to log and move on.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use tracing::{debug, instrument};
use url::Url;

use wikidex_shared::{Result, WikiConfig, WikidexError};

/// User-Agent string for wiki requests.
const USER_AGENT: &str = concat!("wikidex/", env!("CARGO_PKG_VERSION"));

/// HTTP client for one wiki endpoint.
pub struct WikiClient {
    client: Client,
    base: Url,
}

impl WikiClient {
    /// Create a client for the configured wiki endpoint.
    pub fn new(config: &WikiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| WikidexError::config(format!("invalid accept_language: {e}")))?,
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WikidexError::Network(format!("failed to build HTTP client: {e}")))?;

        let base = Url::parse(&config.base_url)
            .map_err(|e| WikidexError::config(format!("invalid base_url: {e}")))?;

        Ok(Self { client, base })
    }

    /// Resolve a page title against the wiki base URL.
    pub fn page_url(&self, title: &str) -> Result<Url> {
        self.base
            .join(title)
            .map_err(|e| WikidexError::Network(format!("invalid page title {title:?}: {e}")))
    }

    /// Fetch one wiki page and return its raw HTML.
    #[instrument(skip(self))]
    pub async fn fetch_page(&self, title: &str) -> Result<String> {
        let url = self.page_url(title)?;
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| WikidexError::Network(format!("GET {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| WikidexError::Network(format!("GET {url} failed: {e}")))?;

        response
            .text()
            .await
            .map_err(|e| WikidexError::Network(format!("reading body of {url} failed: {e}")))
    }

    /// Fetch a binary image asset.
    ///
    /// The wiki emits protocol-relative `//media…` URLs in `data-url`
    /// attributes; those are resolved to https before fetching.
    #[instrument(skip(self))]
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let absolute = if url.starts_with("//") {
            format!("https:{url}")
        } else {
            url.to_string()
        };

        let response = self
            .client
            .get(&absolute)
            .send()
            .await
            .map_err(|e| WikidexError::Network(format!("GET {absolute} failed: {e}")))?
            .error_for_status()
            .map_err(|e| WikidexError::Network(format!("GET {absolute} failed: {e}")))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| WikidexError::Network(format!("reading body of {absolute} failed: {e}")))?;

        Ok(bytes.to_vec())
    }
}
