use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::domain::{CategoryMap, FeedEntry, TaggedItem};
use crate::errors::NewsTagResult;
use crate::services::TagService;
use crate::sources::FeedSource;

/// Entries kept per feed
pub const MAX_ENTRIES: usize = 10;

pub struct NewsService {
    source: Box<dyn FeedSource>,
    tagger: TagService,
    categories: CategoryMap,
    tag_concurrency: usize,
}

impl NewsService {
    pub fn new(
        source: Box<dyn FeedSource>,
        tagger: TagService,
        categories: CategoryMap,
        tag_concurrency: usize,
    ) -> Self {
        Self {
            source,
            tagger,
            categories,
            tag_concurrency: tag_concurrency.max(1),
        }
    }

    pub fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    /// Fetch up to [`MAX_ENTRIES`] entries for a category.
    /// Unknown categories yield an empty list; feed errors propagate.
    pub async fn fetch_entries(&self, category: &str) -> NewsTagResult<Vec<FeedEntry>> {
        let Some(url) = self.categories.resolve(category) else {
            warn!(%category, "Unknown category");
            return Ok(Vec::new());
        };

        let mut entries = self.source.fetch_entries(url).await?;
        entries.truncate(MAX_ENTRIES);
        info!(%category, count = entries.len(), "Fetched feed");

        Ok(entries)
    }

    /// Fetch a category and tag every entry, preserving feed order
    pub async fn fetch_tagged(&self, category: &str) -> NewsTagResult<Vec<TaggedItem>> {
        let entries = self.fetch_entries(category).await?;

        let items = stream::iter(entries)
            .map(|entry| async move {
                let tag = self.tagger.extract_tag(&entry.title, &entry.summary).await;
                entry.with_tag(tag)
            })
            .buffered(self.tag_concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(items)
    }
}
