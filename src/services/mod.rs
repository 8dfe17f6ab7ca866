pub mod news_service;
pub mod tag_service;

pub use news_service::{NewsService, MAX_ENTRIES};
pub use tag_service::{build_prompt, TagService};
