use async_trait::async_trait;

use crate::errors::NewsTagResult;
use crate::generation::response::GenerateContentResponse;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a prompt and return the raw response
    async fn generate(&self, prompt: &str) -> NewsTagResult<GenerateContentResponse>;
}
