pub mod category;
pub mod entry;

pub use category::{CategoryMap, DEFAULT_CATEGORY};
pub use entry::{FeedEntry, TaggedItem};
