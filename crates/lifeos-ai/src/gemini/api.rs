//! AiClient trait implementation for GeminiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, ChunkCallback, TokenUsage, Turn};

use super::client::{candidate_text, usage_from, GeminiClient};

impl GeminiClient {
    /// POST the request body and map HTTP failures onto `AiError`.
    async fn post(&self, url: &str, turns: &[Turn]) -> Result<reqwest::Response, AiError> {
        let body = self.build_request_body(turns);

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn send_message(&self, turns: &[Turn]) -> Result<AiResponse, AiError> {
        debug!(model = %self.config.model, turns = turns.len(), "Gemini API request");

        let response = self.post(&self.api_url(false), turns).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let parsed = self.parse_response(json)?;
        debug!(
            input = parsed.usage.input_tokens,
            output = parsed.usage.output_tokens,
            "Gemini API response"
        );
        Ok(parsed)
    }

    async fn send_message_streaming(
        &self,
        turns: &[Turn],
        on_chunk: ChunkCallback,
    ) -> Result<AiResponse, AiError> {
        debug!(model = %self.config.model, turns = turns.len(), "Gemini API streaming request");

        let url = format!("{}?alt=sse", self.api_url(true));
        let response = self.post(&url, turns).await?;

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();

        parse_sse_stream(response, |event: SseEvent| {
            let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
                return;
            };

            let chunk: String = data["candidates"]
                .as_array()
                .map(|candidates| candidates.iter().map(candidate_text).collect())
                .unwrap_or_default();

            if data.get("usageMetadata").is_some() {
                usage = usage_from(&data);
            }

            if !chunk.is_empty() {
                full_content.push_str(&chunk);
                on_chunk(chunk);
            }
        })
        .await?;

        Ok(AiResponse {
            content: full_content,
            usage,
        })
    }
}
