pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Durable key-value storage for preferences.
///
/// Implementations must serialize writes per key: for any single key the
/// last completed `set` wins and partial values are never observable.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
