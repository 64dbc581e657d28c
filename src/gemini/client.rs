// Gemini API client

use super::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::config::GeminiConfig;
use crate::error::{GatewayError, Result};
use crate::utils::logging;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the Google Generative Language API.
///
/// Performs exactly one blocking `generateContent` call per analysis request.
/// There is no streaming, no batching and no retry; a failed call surfaces
/// immediately and retrying is left to the user.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with a pooled HTTP connection.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    /// Submit one instruction plus an inline image and return the model's
    /// free-text reply.
    ///
    /// The reply format is prompted, not enforced; parsing and fallback
    /// handling belong to the caller.
    pub async fn analyze_image(
        &self,
        instruction: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::Text {
                        text: instruction.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: image_base64.to_string(),
                        },
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                temperature: None,
                max_output_tokens: Some(2048),
            }),
        };

        let response = self.generate_content(request).await?;

        if response.safety_blocked() {
            return Err(GatewayError::SafetyBlocked(
                "candidate finished with reason SAFETY".to_string(),
            ));
        }

        response
            .text()
            .ok_or_else(|| GatewayError::Upstream("No response from Google AI API".to_string()))
    }

    /// Call the `generateContent` endpoint (blocking, single attempt).
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base_url, self.config.model, self.config.api_key
        );
        debug!("Calling generateContent API for model: {}", self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - {}",
                status,
                logging::sanitize(&error_text)
            );
            let error_msg =
                Self::extract_error_message(&error_text).unwrap_or_else(|| error_text.clone());
            return Err(GatewayError::from_upstream(Some(status.as_u16()), error_msg));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                GatewayError::Upstream(format!("Response parsing error: {}", e))
            })?;

        debug!("Successfully received Gemini response");
        Ok(gemini_response)
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".to_string(),
            api_base_url: base_url,
            model: "gemini-1.5-flash".to_string(),
            timeout_seconds: 5,
        }
    }

    fn reply_body(text: &str) -> String {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyze_image_returns_reply_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply_body("DETAILED_DESCRIPTION: a red square"))
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(server.url())).unwrap();
        let reply = client
            .analyze_image("describe", "aGVsbG8=", "image/jpeg")
            .await
            .unwrap();

        assert_eq!(reply, "DETAILED_DESCRIPTION: a red square");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_key_maps_to_invalid_api_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(server.url())).unwrap();
        let err = client
            .analyze_image("describe", "aGVsbG8=", "image/jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidApiKey(_)));
    }

    #[tokio::test]
    async fn test_quota_error_maps_to_quota_exceeded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted (e.g. check quota).","status":"RESOURCE_EXHAUSTED"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(server.url())).unwrap();
        let err = client
            .analyze_image("describe", "aGVsbG8=", "image/jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::QuotaExceeded(_)));
    }

    #[tokio::test]
    async fn test_safety_finish_reason_maps_to_safety_blocked() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(server.url())).unwrap();
        let err = client
            .analyze_image("describe", "aGVsbG8=", "image/jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::SafetyBlocked(_)));
    }

    #[tokio::test]
    async fn test_empty_reply_is_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(server.url())).unwrap();
        let err = client
            .analyze_image("describe", "aGVsbG8=", "image/jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Upstream(_)));
    }
}
