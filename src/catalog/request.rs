use std::fmt;
use std::num::NonZeroU32;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::error::CatalogError;

/// A 1-based result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Page(NonZeroU32);

impl Page {
    pub const FIRST: Page = Page(NonZeroU32::MIN);

    /// Rejects page 0 instead of forwarding it to the service.
    pub fn new(number: u32) -> Result<Self, CatalogError> {
        NonZeroU32::new(number)
            .map(Page)
            .ok_or_else(|| CatalogError::InvalidRequest("page numbers start at 1".to_string()))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn next(self) -> Page {
        Page(self.0.saturating_add(1))
    }

    /// `None` on the first page.
    pub fn previous(self) -> Option<Page> {
        NonZeroU32::new(self.0.get() - 1).map(Page)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::FIRST
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a catalog movie, as it appears in `/movie/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidRequest(
                "movie id must not be empty".to_string(),
            ));
        }
        Ok(MovieId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        MovieId(id.to_string())
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    PopularList,
    Search { query: String },
    DetailById { id: MovieId },
}

/// One call against the catalog. Built per call and dropped once answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    kind: RequestKind,
    page: Option<Page>,
}

impl CatalogRequest {
    pub fn popular(page: Page) -> Self {
        Self {
            kind: RequestKind::PopularList,
            page: Some(page),
        }
    }

    pub fn search(query: impl Into<String>, page: Page) -> Self {
        Self {
            kind: RequestKind::Search {
                query: query.into(),
            },
            page: Some(page),
        }
    }

    pub fn details(id: MovieId) -> Self {
        Self {
            kind: RequestKind::DetailById { id },
            page: None,
        }
    }

    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    pub fn page(&self) -> Option<Page> {
        self.page
    }

    /// Short label used in logs.
    pub fn operation(&self) -> &'static str {
        match self.kind {
            RequestKind::PopularList => "popular",
            RequestKind::Search { .. } => "search",
            RequestKind::DetailById { .. } => "details",
        }
    }

    fn path_segments(&self) -> Vec<&str> {
        match &self.kind {
            RequestKind::PopularList => vec!["movie", "popular"],
            RequestKind::Search { .. } => vec!["search", "movie"],
            RequestKind::DetailById { id } => vec!["movie", id.as_str()],
        }
    }

    /// Full request URL below `base`. Segments and query values are escaped
    /// by `url`, so an id can never spill into another path segment.
    pub fn url(&self, base: &Url, locale: &str) -> Result<Url, CatalogError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidRequest(format!("{base} cannot be used as a base URL")))?
            .pop_if_empty()
            .extend(self.path_segments());

        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            if let RequestKind::Search { query: text } = &self.kind {
                query.append_pair("query", text);
            }
            query.append_pair("language", locale);
            if let Some(page) = self.page {
                query.append_pair("page", &page.to_string());
            }
        }
        Ok(url)
    }
}

/// Decoded body of a catalog response, exactly as the service sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogResponse(Value);

impl CatalogResponse {
    pub fn new(body: Value) -> Self {
        CatalogResponse(body)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Reads the payload into one of the lenient [`crate::catalog::model`] types.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, CatalogError> {
        Ok(serde_json::from_value(self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.themoviedb.org/3").unwrap()
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(matches!(Page::new(0), Err(CatalogError::InvalidRequest(_))));
        assert_eq!(Page::new(7).unwrap().get(), 7);
        assert_eq!(Page::default(), Page::FIRST);
        assert_eq!(Page::FIRST.get(), 1);
    }

    #[test]
    fn page_stepping() {
        let second = Page::FIRST.next();
        assert_eq!(second.get(), 2);
        assert_eq!(second.previous(), Some(Page::FIRST));
        assert_eq!(Page::FIRST.previous(), None);
    }

    #[test]
    fn movie_id_must_have_content() {
        assert!(MovieId::new("").is_err());
        assert!(MovieId::new("   ").is_err());
        assert_eq!(MovieId::new(" 550 ").unwrap().as_str(), "550");
        assert_eq!(MovieId::from(42).to_string(), "42");
    }

    #[test]
    fn popular_url_carries_language_then_page() {
        let url = CatalogRequest::popular(Page::new(3).unwrap())
            .url(&base(), "es-ES")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/popular?language=es-ES&page=3"
        );
    }

    #[test]
    fn search_url_forwards_query_verbatim() {
        let url = CatalogRequest::search("el padrino", Page::FIRST)
            .url(&base(), "es-ES")
            .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.path(), "/3/search/movie");
        assert_eq!(
            pairs,
            vec![
                ("query".to_string(), "el padrino".to_string()),
                ("language".to_string(), "es-ES".to_string()),
                ("page".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn empty_search_query_is_still_sent() {
        let url = CatalogRequest::search("", Page::FIRST)
            .url(&base(), "es-ES")
            .unwrap();
        assert_eq!(url.query(), Some("query=&language=es-ES&page=1"));
    }

    #[test]
    fn details_url_has_no_page() {
        let url = CatalogRequest::details(MovieId::from(550))
            .url(&base(), "es-ES")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/550?language=es-ES"
        );
    }

    #[test]
    fn details_id_stays_one_segment() {
        let id = MovieId::new("../search/movie").unwrap();
        let url = CatalogRequest::details(id).url(&base(), "es-ES").unwrap();
        assert_eq!(url.path(), "/3/movie/..%2Fsearch%2Fmovie");
    }

    #[test]
    fn trailing_slash_on_base_is_tolerated() {
        let base = Url::parse("http://127.0.0.1:9000/3/").unwrap();
        let url = CatalogRequest::popular(Page::FIRST).url(&base, "es-ES").unwrap();
        assert_eq!(url.path(), "/3/movie/popular");
    }

    #[test]
    fn response_is_passed_through() {
        let body = serde_json::json!({"page": 1, "anything": [1, 2, 3]});
        let response = CatalogResponse::new(body.clone());
        assert_eq!(response.as_value(), &body);
        assert_eq!(response.into_value(), body);
    }
}
