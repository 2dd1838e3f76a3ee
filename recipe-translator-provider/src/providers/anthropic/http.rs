//! Anthropic HTTP 请求方法

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, RequestContext};
use crate::providers::common::join_url;
use crate::providers::prompt::Prompt;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{
    ANTHROPIC_API_VERSION, AnthropicErrorEnvelope, AnthropicProvider, MAX_OUTPUT_TOKENS, Message,
    MessagesRequest, MessagesResponse,
};

impl AnthropicProvider {
    fn api_error(&self, status: u16, body: &str) -> ProviderError {
        let raw = match serde_json::from_str::<AnthropicErrorEnvelope>(body) {
            Ok(envelope) => {
                RawApiError::with_code(status, envelope.error.error_type, envelope.error.message)
            }
            Err(_) => RawApiError::new(status, body.to_string()),
        };
        log::error!("[anthropic] API error (HTTP {status}): {}", raw.message);
        self.map_error(raw)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, join_url(&self.base_url, path))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
    }

    /// POST /messages，拼接所有 text 块
    pub(crate) async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_OUTPUT_TOKENS,
            system: &prompt.system,
            messages: vec![Message {
                role: "user",
                content: &prompt.user,
            }],
            temperature: 0.2,
        };
        let payload = serde_json::to_vec(&body).map_err(|e| self.serialization_error(e))?;

        let request = self
            .request(reqwest::Method::POST, "messages")
            .header("Content-Type", "application/json")
            .body(payload);
        let ctx = RequestContext {
            provider: self.provider_name(),
            operation: "POST /messages",
        };
        let (status, text) = HttpUtils::execute_request_with_retry(request, ctx, self.retry).await?;
        if !(200..300).contains(&status) {
            return Err(self.api_error(status, &text));
        }

        let response: MessagesResponse = HttpUtils::parse_json(&text, self.provider_name())?;
        if response.stop_reason.as_deref() == Some("max_tokens") {
            // 被截断的 JSON 数组必然解析失败，这里提前给出明确原因
            return Err(self.parse_error("Answer truncated at max_tokens"));
        }

        let answer: String = response
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect();
        if answer.trim().is_empty() {
            return Err(self.parse_error("Response has no text content"));
        }
        Ok(answer)
    }

    /// GET /models，仅用于凭证校验
    pub(crate) async fn list_models(&self) -> Result<()> {
        let request = self.request(reqwest::Method::GET, "models");
        let ctx = RequestContext {
            provider: self.provider_name(),
            operation: "GET /models",
        };
        let (status, text) = HttpUtils::execute_request_with_retry(request, ctx, self.retry).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(self.api_error(status, &text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProviderOptions;

    #[test]
    fn error_envelope_type_is_used() {
        let p = AnthropicProvider::new(String::new(), ProviderOptions::default());
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"slow down"}}"#;
        assert!(matches!(
            p.api_error(429, body),
            ProviderError::RateLimited { .. }
        ));
    }

    #[test]
    fn requests_carry_version_header() {
        let p = AnthropicProvider::new("k".to_string(), ProviderOptions::default());
        let req = p
            .request(reqwest::Method::GET, "models")
            .build()
            .unwrap();
        assert_eq!(req.url().as_str(), "https://api.anthropic.com/v1/models");
        assert_eq!(req.headers()["anthropic-version"], ANTHROPIC_API_VERSION);
        assert_eq!(req.headers()["x-api-key"], "k");
    }
}
