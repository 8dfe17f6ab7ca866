use std::sync::Arc;

use crate::services::NewsService;

#[derive(Clone)]
pub struct AppState {
    pub news: Arc<NewsService>,
}

impl AppState {
    pub fn new(news: NewsService) -> Self {
        Self {
            news: Arc::new(news),
        }
    }
}
