use std::time::Duration;

use crate::domain::CategoryMap;
use crate::errors::{NewsTagError, NewsTagResult};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TAG_CONCURRENCY: usize = 1;

#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub http_timeout: Duration,
    pub tag_concurrency: usize,
    pub categories: CategoryMap,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("http_timeout", &self.http_timeout)
            .field("tag_concurrency", &self.tag_concurrency)
            .field("categories", &self.categories)
            .finish()
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> NewsTagResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> NewsTagResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NewsTagError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let gemini_model = lookup("GEMINI_MODEL")
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let gemini_api_base = lookup("GEMINI_API_BASE")
            .filter(|b| !b.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&gemini_api_base)
            .map_err(|e| NewsTagError::Config(format!("GEMINI_API_BASE: {}", e)))?;

        let timeout_secs = match lookup("NEWSTAG_HTTP_TIMEOUT_SECS").filter(|t| !t.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(NewsTagError::Config(format!(
                        "NEWSTAG_HTTP_TIMEOUT_SECS must be a positive integer: {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let tag_concurrency = match lookup("NEWSTAG_TAG_CONCURRENCY").filter(|c| !c.trim().is_empty()) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(NewsTagError::Config(format!(
                        "NEWSTAG_TAG_CONCURRENCY must be a positive integer: {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_TAG_CONCURRENCY,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            http_timeout: Duration::from_secs(timeout_secs),
            tag_concurrency,
            categories: CategoryMap::default(),
        })
    }
}
