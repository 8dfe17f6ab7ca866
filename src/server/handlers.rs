use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::error;

use crate::domain::{TaggedItem, DEFAULT_CATEGORY};
use crate::errors::NewsTagError;
use crate::server::state::AppState;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl IntoResponse for NewsTagError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Tagged news for a category
pub async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<TaggedItem>>, NewsTagError> {
    let items = state.news.fetch_tagged(&query.category).await?;
    Ok(Json(items))
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .news
            .categories()
            .keys()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}
