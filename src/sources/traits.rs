use async_trait::async_trait;

use crate::domain::FeedEntry;
use crate::errors::NewsTagResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse the feed at `url`, returning entries in document order
    async fn fetch_entries(&self, url: &str) -> NewsTagResult<Vec<FeedEntry>>;
}
