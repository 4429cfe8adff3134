use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::catalog::error::CatalogError;
use crate::catalog::request::{CatalogRequest, CatalogResponse, MovieId, Page};
use crate::catalog::{DEFAULT_BASE_URL, DEFAULT_LOCALE};

/// Everything the preconfigured HTTP client needs: where the catalog lives,
/// how to authenticate and which locale to ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: Url,
    pub access_token: Option<String>,
    pub locale: String,
    /// Overall request timeout. `None` keeps the HTTP client's own default.
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            access_token: None,
            locale: DEFAULT_LOCALE.to_string(),
            timeout: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("valid base URL"))
    }
}

/// Blocking client for the three catalog operations.
///
/// Holds no per-call state, so clones can be handed to worker threads and
/// used concurrently without any coordination. The bearer token is attached
/// to catalog calls only; poster downloads go to another host and carry none.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    auth: Option<HeaderValue>,
    base_url: Url,
    locale: String,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidRequest(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let auth = config.access_token.as_deref().map(bearer).transpose()?;
        let http = http_builder(config.timeout).build()?;

        Ok(Self {
            http,
            auth,
            base_url: config.base_url,
            locale: config.locale,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current popularity listing. Pass `Page::default()` for the first page.
    pub fn popular_movies(&self, page: Page) -> Result<CatalogResponse, CatalogError> {
        self.execute(&CatalogRequest::popular(page))
    }

    /// Title search. The query goes out exactly as given, empty or not.
    pub fn search_movies(&self, query: &str, page: Page) -> Result<CatalogResponse, CatalogError> {
        self.execute(&CatalogRequest::search(query, page))
    }

    pub fn movie_details(&self, id: &MovieId) -> Result<CatalogResponse, CatalogError> {
        self.execute(&CatalogRequest::details(id.clone()))
    }

    /// The URL `request` would be sent to.
    pub fn request_url(&self, request: &CatalogRequest) -> Result<Url, CatalogError> {
        request.url(&self.base_url, &self.locale)
    }

    /// Issues a single GET and returns the JSON body. No retries.
    pub fn execute(&self, request: &CatalogRequest) -> Result<CatalogResponse, CatalogError> {
        let url = self.request_url(request)?;
        tracing::debug!(op = request.operation(), %url, "catalog request");

        let mut builder = self.http.get(url);
        if let Some(auth) = &self.auth {
            builder = builder.header(AUTHORIZATION, auth.clone());
        }

        let result = builder
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<Value>());

        match result {
            Ok(body) => Ok(CatalogResponse::new(body)),
            Err(err) => {
                tracing::warn!(op = request.operation(), error = %err, "catalog request failed");
                Err(err.into())
            }
        }
    }

    /// Raw bytes from an arbitrary URL, used for poster images. Sent without
    /// the bearer token.
    pub(crate) fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let bytes = self.http.get(url).send()?.error_for_status()?.bytes()?;
        Ok(bytes.to_vec())
    }
}

fn bearer(token: &str) -> Result<HeaderValue, CatalogError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        CatalogError::InvalidRequest("access token contains invalid characters".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

/// Shared transport settings. The timeout is only touched when one is
/// configured, so reqwest's default stays in force otherwise.
fn http_builder(timeout: Option<Duration>) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let builder = Client::builder().default_headers(headers);
    match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_tmdb_in_spanish() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url.as_str(), "https://api.themoviedb.org/3");
        assert_eq!(config.locale, "es-ES");
        assert!(config.access_token.is_none());
    }

    #[test]
    fn locale_is_injected_into_every_request() {
        let client = CatalogClient::new(CatalogConfig::default().with_locale("en-US")).unwrap();
        let url = client
            .request_url(&CatalogRequest::details(MovieId::from(7)))
            .unwrap();
        assert_eq!(url.query(), Some("language=en-US"));
    }

    #[test]
    fn non_hierarchical_base_is_rejected() {
        let config = CatalogConfig::new(Url::parse("mailto:movies@example.com").unwrap());
        assert!(matches!(
            CatalogClient::new(config),
            Err(CatalogError::InvalidRequest(_))
        ));
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let config = CatalogConfig::default().with_access_token("abc\ndef");
        assert!(CatalogClient::new(config).is_err());
    }

    #[test]
    fn bearer_value_is_marked_sensitive() {
        let value = bearer("abc").unwrap();
        assert_eq!(value, "Bearer abc");
        assert!(value.is_sensitive());
    }
}
