//! HTTP image provider.
//!
//! Talks to an image-search endpoint shaped like TheCatAPI: a GET with a
//! `limit` query parameter and an `x-api-key` header, answered by a JSON
//! array of objects carrying a `url` field. Response handling is factored
//! apart from transport so it can be tested without a network.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{ImageLocator, ImageSource};
use crate::core::{SourceConfig, API_KEY_HEADER};
use crate::errors::{GameError, SourceError};

/// One entry in the provider's search response. Fields other than `url`
/// are ignored.
#[derive(Debug, Deserialize)]
struct SearchHit {
    url: String,
}

/// Image provider backed by a TheCatAPI-style HTTP endpoint.
#[derive(Clone, Debug)]
pub struct CatApiSource {
    client: Client,
    config: SourceConfig,
}

impl CatApiSource {
    /// Create a provider from connection settings.
    #[must_use]
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn search_url(&self, count: usize) -> String {
        format!(
            "{}/v1/images/search?limit={}",
            self.config.api_base.trim_end_matches('/'),
            count
        )
    }
}

/// Deduplicate hits (keeping first occurrence), enforce the exact-count
/// contract, and truncate to the requested amount.
fn locators_from_hits(
    hits: Vec<SearchHit>,
    wanted: usize,
) -> Result<Vec<ImageLocator>, SourceError> {
    let mut locators: Vec<ImageLocator> = Vec::with_capacity(hits.len());
    for hit in hits {
        let locator = ImageLocator::new(hit.url);
        if !locators.contains(&locator) {
            locators.push(locator);
        }
    }

    if locators.len() < wanted {
        return Err(SourceError::Insufficient {
            wanted,
            got: locators.len(),
        });
    }
    locators.truncate(wanted);
    Ok(locators)
}

#[async_trait]
impl ImageSource for CatApiSource {
    fn validate(&self) -> Result<(), GameError> {
        self.config.credential().map(|_| ())
    }

    async fn fetch_values(&self, count: usize) -> Result<Vec<ImageLocator>, SourceError> {
        // Backstop for callers that skipped validate(); still no network
        // traffic without a usable credential.
        let key = self
            .config
            .credential()
            .map_err(|err| SourceError::Unauthorized(err.to_string()))?;

        let url = self.search_url(count);
        log::debug!("requesting {} image locators from {}", count, url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Unauthorized(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            return Err(SourceError::Network(format!(
                "unexpected HTTP status {}",
                status
            )));
        }

        let hits: Vec<SearchHit> = response.json().await?;
        locators_from_hits(hits, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_API_BASE;

    fn hits(urls: &[&str]) -> Vec<SearchHit> {
        urls.iter().map(|u| SearchHit { url: (*u).to_string() }).collect()
    }

    #[test]
    fn test_search_url() {
        let source = CatApiSource::new(SourceConfig::new(DEFAULT_API_BASE, None));
        assert_eq!(
            source.search_url(8),
            "https://api.thecatapi.com/v1/images/search?limit=8"
        );
    }

    #[test]
    fn test_search_url_strips_trailing_slash() {
        let source = CatApiSource::new(SourceConfig::new("http://localhost:8080/", None));
        assert_eq!(
            source.search_url(2),
            "http://localhost:8080/v1/images/search?limit=2"
        );
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"[{"id":"abc","url":"https://cdn.example/a.jpg","width":640,"height":480},
                      {"id":"def","url":"https://cdn.example/b.jpg","width":640,"height":480}]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(raw).unwrap();
        let locators = locators_from_hits(hits, 2).unwrap();
        assert_eq!(locators[0].as_str(), "https://cdn.example/a.jpg");
        assert_eq!(locators[1].as_str(), "https://cdn.example/b.jpg");
    }

    #[test]
    fn test_exact_count_is_enforced() {
        let err = locators_from_hits(hits(&["a", "b", "c"]), 4).unwrap_err();
        assert_eq!(err, SourceError::Insufficient { wanted: 4, got: 3 });
    }

    #[test]
    fn test_duplicates_do_not_count() {
        let err = locators_from_hits(hits(&["a", "b", "a", "b"]), 3).unwrap_err();
        assert_eq!(err, SourceError::Insufficient { wanted: 3, got: 2 });
    }

    #[test]
    fn test_surplus_is_truncated() {
        let locators = locators_from_hits(hits(&["a", "b", "c", "d"]), 2).unwrap();
        assert_eq!(locators.len(), 2);
        assert_eq!(locators[0].as_str(), "a");
        assert_eq!(locators[1].as_str(), "b");
    }

    #[test]
    fn test_validate_requires_credential() {
        let source = CatApiSource::new(SourceConfig::new(DEFAULT_API_BASE, None));
        assert!(source.validate().is_err());

        let source =
            CatApiSource::new(SourceConfig::new(DEFAULT_API_BASE, Some("live_key".to_string())));
        assert!(source.validate().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_without_credential_never_hits_network() {
        let source = CatApiSource::new(SourceConfig::new("http://192.0.2.1:1", None));
        let err = source.fetch_values(8).await.unwrap_err();
        assert!(matches!(err, SourceError::Unauthorized(_)));
    }
}
