use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::errors::{NewsTagError, NewsTagResult};
use crate::generation::response::{GenerateContentRequest, GenerateContentResponse};
use crate::generation::traits::TextGenerator;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: &str, model: &str, api_base: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            &config.gemini_api_key,
            &config.gemini_model,
            &config.gemini_api_base,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> NewsTagResult<GenerateContentResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(NewsTagError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};

    async fn generate_handler(headers: HeaderMap, Json(body): Json<serde_json::Value>) -> impl IntoResponse {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("test-key") {
            return (
                StatusCode::FORBIDDEN,
                Json(serde_json::json!({"error": {"message": "API key not valid"}})),
            );
        }

        let prompt = body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let tag = if prompt.contains("野球") { "野球" } else { "ニュース" };

        (
            StatusCode::OK,
            Json(serde_json::json!({
                "candidates": [{
                    "content": {"parts": [{"text": format!("{}\n", tag)}], "role": "model"},
                    "finishReason": "STOP"
                }]
            })),
        )
    }

    async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route("/v1beta/models/{model}", post(generate_handler))
            .route("/broken/models/{model}", post(|| async { "not json" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new(Client::new(), "k", "gemini-2.0-flash", "https://example.com/v1beta/");
        assert_eq!(
            client.endpoint(),
            "https://example.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(client.model(), "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_generate_decodes_candidates() {
        let (base, server_task) = spawn_test_server().await;
        let client = GeminiClient::new(
            Client::new(),
            "test-key",
            "gemini-2.0-flash",
            &format!("{base}/v1beta"),
        );

        let response = client.generate("タイトル: 大谷が野球で活躍").await.unwrap();
        let candidates = response.candidates.expect("candidates should be present");
        let text = candidates[0].content.as_ref().unwrap().parts.as_ref().unwrap()[0]
            .text
            .clone();
        assert_eq!(text.as_deref(), Some("野球\n"));

        server_task.abort();
    }

    #[tokio::test]
    async fn test_generate_rejected_key_is_status_error() {
        let (base, server_task) = spawn_test_server().await;
        let client = GeminiClient::new(
            Client::new(),
            "wrong-key",
            "gemini-2.0-flash",
            &format!("{base}/v1beta"),
        );

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, NewsTagError::HttpStatus { status: 403, .. }));

        server_task.abort();
    }

    #[tokio::test]
    async fn test_generate_invalid_body_is_json_error() {
        let (base, server_task) = spawn_test_server().await;
        let client = GeminiClient::new(
            Client::new(),
            "test-key",
            "gemini-2.0-flash",
            &format!("{base}/broken"),
        );

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, NewsTagError::Json(_)));

        server_task.abort();
    }
}
