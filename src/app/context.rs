use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{NewsdeckError, Result};
use crate::config::Config;
use crate::feed::client::HttpFeedClient;
use crate::feed::FeedClient;
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub client: Arc<dyn FeedClient + Send + Sync>,
    pub config: Config,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let client: Arc<dyn FeedClient + Send + Sync> = Arc::new(HttpFeedClient::new(&config.api)?);

        Ok(Self {
            store,
            client,
            config,
        })
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let client: Arc<dyn FeedClient + Send + Sync> = Arc::new(HttpFeedClient::new(&config.api)?);

        Ok(Self {
            store,
            client,
            config,
        })
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewsdeckError::Config("Could not find data directory".into()))?;
        let newsdeck_dir = data_dir.join("newsdeck");
        std::fs::create_dir_all(&newsdeck_dir)?;
        Ok(newsdeck_dir.join("newsdeck.db"))
    }
}
