use serde::{Deserialize, Serialize};

/// A normalized feed item. `summary` is never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
}

impl FeedEntry {
    /// Build an entry, substituting the title when the summary is missing or blank
    pub fn new(title: String, summary: Option<String>, link: String) -> Self {
        let summary = match summary {
            Some(s) if !s.trim().is_empty() => s,
            _ => title.clone(),
        };

        Self {
            title,
            summary,
            link,
        }
    }

    pub fn with_tag(self, tag: String) -> TaggedItem {
        TaggedItem {
            title: self.title,
            summary: self.summary,
            link: self.link,
            tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedItem {
    pub title: String,
    pub summary: String,
    pub link: String,
    pub tag: String,
}
