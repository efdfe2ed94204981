use chrono::{DateTime, Utc};

use crate::domain::{dedup_by_url, Article, Category};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// A fetch the controller wants carried out. The sequence number ties the
/// eventual response back to the request that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub category: Category,
    pub query: &'static str,
}

/// State machine for the category-driven article list.
///
/// The controller itself does no IO. `select_category` hands back a
/// [`FetchRequest`] when a fetch should happen; whoever performs it reports
/// back through `apply_articles` / `apply_error` with the request's sequence
/// number. Only the latest issued sequence number is authoritative; anything
/// older is discarded.
///
/// While a new category loads, the previous article list stays visible; it
/// is replaced only when fresh data arrives. A failed fetch also keeps the
/// previous list.
pub struct FeedController {
    selected: Category,
    articles: Vec<Article>,
    status: FeedStatus,
    seq: u64,
    last_error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            selected: Category::General,
            articles: Vec::new(),
            status: FeedStatus::Idle,
            seq: 0,
            last_error: None,
            last_updated: None,
        }
    }

    /// Select a category, returning the fetch to carry out, or `None` when
    /// the selection is already loading or loaded. `Failed` always re-issues
    /// so a retry on the same category works.
    pub fn select_category(&mut self, category: Category) -> Option<FetchRequest> {
        if category == self.selected
            && matches!(self.status, FeedStatus::Loading | FeedStatus::Loaded)
        {
            return None;
        }

        self.selected = category;
        self.status = FeedStatus::Loading;
        self.seq += 1;

        Some(FetchRequest {
            seq: self.seq,
            category,
            query: category.query(),
        })
    }

    /// Apply a successful response. Returns false when the response was
    /// stale and ignored.
    pub fn apply_articles(&mut self, seq: u64, articles: Vec<Article>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale response");
            return false;
        }
        self.articles = dedup_by_url(articles);
        self.status = FeedStatus::Loaded;
        self.last_error = None;
        self.last_updated = Some(Utc::now());
        true
    }

    /// Apply a failed fetch. The previous article list is kept so the user
    /// still has something to read. Returns false when the failure was stale.
    pub fn apply_error(&mut self, seq: u64, reason: impl Into<String>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale failure");
            return false;
        }
        self.status = FeedStatus::Failed;
        self.last_error = Some(reason.into());
        true
    }

    pub fn selected_category(&self) -> Category {
        self.selected
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}
