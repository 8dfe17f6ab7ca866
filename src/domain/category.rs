use std::collections::BTreeMap;

/// Category used when a request does not name one
pub const DEFAULT_CATEGORY: &str = "it";

/// Static mapping from category key to feed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMap {
    feeds: BTreeMap<String, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self {
            feeds: BTreeMap::new(),
        }
    }

    pub fn with_feed(mut self, category: &str, url: &str) -> Self {
        self.feeds.insert(category.to_string(), url.to_string());
        self
    }

    /// Resolve a category key to its feed URL. Unknown keys resolve to `None`.
    pub fn resolve(&self, category: &str) -> Option<&str> {
        self.feeds.get(category).map(String::as_str)
    }

    /// Category keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        self.feeds.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.feeds.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.feeds.len()
    }
}

impl Default for CategoryMap {
    /// Yahoo! News Japan topic feeds
    fn default() -> Self {
        Self::new()
            .with_feed("it", "https://news.yahoo.co.jp/rss/topics/it.xml")
            .with_feed("sports", "https://news.yahoo.co.jp/rss/topics/sports.xml")
            .with_feed("economy", "https://news.yahoo.co.jp/rss/topics/business.xml")
    }
}
