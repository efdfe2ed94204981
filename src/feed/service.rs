use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::{Article, Category};
use crate::feed::client::FeedClient;
use crate::feed::controller::{FeedController, FeedStatus};

/// Point-in-time copy of the feed state for rendering.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub category: Category,
    pub articles: Vec<Article>,
    pub status: FeedStatus,
    pub last_error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Async driver around [`FeedController`].
///
/// Each issued fetch runs on its own task; the controller is locked only to
/// issue the request and to apply the result, so new `select_category` calls
/// stay responsive while fetches are outstanding. The controller's sequence
/// gate decides which result wins; outstanding fetches are never cancelled,
/// only ignored.
pub struct FeedService {
    controller: Arc<Mutex<FeedController>>,
    client: Arc<dyn FeedClient + Send + Sync>,
}

impl FeedService {
    pub fn new(client: Arc<dyn FeedClient + Send + Sync>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(FeedController::new())),
            client,
        }
    }

    /// Select a category. Returns the handle of the spawned fetch task, or
    /// `None` when the controller decided no fetch was needed.
    pub async fn select_category(&self, category: Category) -> Option<JoinHandle<()>> {
        let request = self.controller.lock().await.select_category(category)?;

        let controller = self.controller.clone();
        let client = self.client.clone();

        Some(tokio::spawn(async move {
            match client.fetch(request.query).await {
                Ok(articles) => {
                    controller.lock().await.apply_articles(request.seq, articles);
                }
                Err(e) => {
                    tracing::warn!(category = %request.category, error = %e, "fetch failed");
                    controller.lock().await.apply_error(request.seq, e.to_string());
                }
            }
        }))
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let controller = self.controller.lock().await;
        FeedSnapshot {
            category: controller.selected_category(),
            articles: controller.articles().to_vec(),
            status: controller.status(),
            last_error: controller.last_error().map(String::from),
            last_updated: controller.last_updated(),
        }
    }
}
