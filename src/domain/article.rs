use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single headline as reported by the news API.
///
/// The article URL is the unique identifier; two entries with the same URL
/// are the same article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: url.into(),
            image_url: None,
        }
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Drop duplicate articles, keeping the first occurrence of each URL.
/// Server order is preserved otherwise.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let articles = vec![
            Article::new("First", "https://example.com/a"),
            Article::new("Second", "https://example.com/b"),
            Article::new("Duplicate of first", "https://example.com/a"),
        ];

        let deduped = dedup_by_url(articles);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "First");
        assert_eq!(deduped[1].title, "Second");
    }

    #[test]
    fn test_dedup_preserves_order() {
        let articles = vec![
            Article::new("c", "https://example.com/c"),
            Article::new("a", "https://example.com/a"),
            Article::new("b", "https://example.com/b"),
        ];

        let urls: Vec<_> = dedup_by_url(articles).into_iter().map(|a| a.url).collect();
        assert_eq!(
            urls,
            vec![
                "https://example.com/c",
                "https://example.com/a",
                "https://example.com/b"
            ]
        );
    }

    #[test]
    fn test_display_description_empty_when_missing() {
        let article = Article::new("Title only", "https://example.com/a");
        assert_eq!(article.display_description(), "");
    }
}
