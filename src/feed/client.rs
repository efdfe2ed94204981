use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{NewsdeckError, Result};
use crate::config::ApiConfig;
use crate::domain::Article;

#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch articles matching a category query. Auth and quota failures
    /// surface as errors like any other; the caller does not distinguish.
    async fn fetch(&self, query: &str) -> Result<Vec<Article>>;
}

/// reqwest-based client for the news API.
pub struct HttpFeedClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    country: String,
}

impl HttpFeedClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent("newsdeck/0.1.0")
            .build()?;

        Ok(Self {
            client,
            endpoint: Url::parse(&config.endpoint)?,
            api_key: config.api_key.clone(),
            country: config.country.clone(),
        })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self, query: &str) -> Result<Vec<Article>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("country", &self.country)
            .append_pair("apiKey", &self.api_key);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<WireError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Err(NewsdeckError::Fetch(message));
        }

        let body: WireResponse = response.json().await?;
        Ok(map_articles(body.articles))
    }
}

// The API's JSON shape is an external contract; only the fields we map are
// declared.
#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
struct WireArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: Option<String>,
}

/// Map wire articles into the domain model. Entries without a URL have no
/// identity and are dropped.
fn map_articles(wire: Vec<WireArticle>) -> Vec<Article> {
    wire.into_iter()
        .filter_map(|a| {
            let url = a.url?;
            Some(Article {
                title: a.title.unwrap_or_else(|| "(Untitled)".into()),
                description: a.description,
                url,
                image_url: a.url_to_image,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_wire_fields() {
        let body = r#"{
            "status": "ok",
            "totalResults": 1,
            "articles": [{
                "title": "Rust 2.0 announced",
                "description": "Not really",
                "url": "https://example.com/rust",
                "urlToImage": "https://example.com/rust.png"
            }]
        }"#;

        let response: WireResponse = serde_json::from_str(body).unwrap();
        let articles = map_articles(response.articles);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Rust 2.0 announced");
        assert_eq!(articles[0].url, "https://example.com/rust");
        assert_eq!(
            articles[0].image_url.as_deref(),
            Some("https://example.com/rust.png")
        );
    }

    #[test]
    fn test_missing_image_and_description_are_optional() {
        let body = r#"{"articles": [{"title": "Bare", "url": "https://example.com/bare"}]}"#;
        let response: WireResponse = serde_json::from_str(body).unwrap();
        let articles = map_articles(response.articles);

        assert_eq!(articles.len(), 1);
        assert!(articles[0].description.is_none());
        assert!(articles[0].image_url.is_none());
    }

    #[test]
    fn test_entry_without_url_is_dropped() {
        let body = r#"{"articles": [
            {"title": "No identity"},
            {"title": "Kept", "url": "https://example.com/kept"}
        ]}"#;
        let response: WireResponse = serde_json::from_str(body).unwrap();
        let articles = map_articles(response.articles);

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "https://example.com/kept");
    }

    #[test]
    fn test_missing_title_gets_placeholder() {
        let body = r#"{"articles": [{"url": "https://example.com/x"}]}"#;
        let response: WireResponse = serde_json::from_str(body).unwrap();
        let articles = map_articles(response.articles);
        assert_eq!(articles[0].title, "(Untitled)");
    }

    #[test]
    fn test_empty_response_maps_to_empty_list() {
        let response: WireResponse = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(map_articles(response.articles).is_empty());
    }
}
