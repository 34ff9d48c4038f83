//! Semantic Scholar API client.
//!
//! Thin async wrapper over reqwest with connection pooling. Every call is a
//! single request: no retries, no rate limiting, no in-memory cache. Cross-run
//! reuse of responses is the job of the on-disk snapshot cache.

use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{AuthorPapersResult, AuthorSearchResult, CitationResult};

/// Semantic Scholar API client.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client.
    client: Client,

    /// API key (optional).
    api_key: Option<String>,

    /// Graph API base URL.
    graph_api_url: String,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json".parse().expect("valid content-type header"),
        );

        if let Some(ref key) = config.api_key {
            headers.insert("x-api-key", key.parse()?);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(api::MAX_KEEPALIVE)
            .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        Ok(Self { client, api_key: config.api_key, graph_api_url: config.graph_api_url })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search for authors by name.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_authors(
        &self,
        query: &str,
        offset: i32,
        limit: i32,
    ) -> ClientResult<AuthorSearchResult> {
        let url = format!("{}/author/search", self.graph_api_url);

        let params = vec![
            ("query".to_string(), query.to_string()),
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];

        self.get(&url, &params).await
    }

    /// Get one page of an author's publications.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_author_papers(
        &self,
        author_id: &str,
        offset: i32,
        limit: i32,
        fields: &[&str],
    ) -> ClientResult<AuthorPapersResult> {
        let url = format!("{}/author/{}/papers", self.graph_api_url, author_id);

        let params = vec![
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), fields.join(",")),
        ];

        self.get(&url, &params).await
    }

    /// Get one page of a paper's citations.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn get_citations(
        &self,
        paper_id: &str,
        offset: i32,
        limit: i32,
        fields: &[&str],
    ) -> ClientResult<CitationResult> {
        let url = format!("{}/paper/{}/citations", self.graph_api_url, paper_id);

        let params = vec![
            ("offset".to_string(), offset.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("fields".to_string(), format!("citingPaper.{}", fields.join(",citingPaper."))),
        ];

        self.get(&url, &params).await
    }

    /// Make a GET request.
    async fn get<T>(&self, url: &str, params: &[(String, String)]) -> ClientResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.client.get(url).query(params).send().await?;

        let response = self.handle_response(response).await?;
        let value: serde_json::Value = response.json().await?;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient").field("has_api_key", &self.has_api_key()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_succeeds() {
        let client = ScholarClient::new(Config::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_reports_api_key_status() {
        let client = ScholarClient::new(Config::new(Some("key".to_string()))).unwrap();
        assert!(client.has_api_key());

        let client = ScholarClient::new(Config::default()).unwrap();
        assert!(!client.has_api_key());
    }

    #[test]
    fn test_client_debug_hides_api_key() {
        let client = ScholarClient::new(Config::new(Some("super-secret-key".to_string()))).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("has_api_key"));
    }
}
