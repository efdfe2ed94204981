pub mod article;
pub mod category;

pub use article::{dedup_by_url, Article};
pub use category::Category;
