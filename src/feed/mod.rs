pub mod client;
pub mod controller;
pub mod service;

pub use client::{FeedClient, HttpFeedClient};
pub use controller::{FeedController, FeedStatus, FetchRequest};
pub use service::{FeedService, FeedSnapshot};
