//! OpenAI HTTP 请求方法

use crate::error::Result;
use crate::http_client::{HttpUtils, RequestContext};
use crate::providers::common::join_url;
use crate::providers::prompt::Prompt;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenaiErrorEnvelope,
    OpenaiProvider,
};

impl OpenaiProvider {
    /// 把非 2xx 响应映射为 `ProviderError`
    fn api_error(&self, status: u16, body: &str) -> crate::error::ProviderError {
        let raw = match serde_json::from_str::<OpenaiErrorEnvelope>(body) {
            Ok(envelope) => {
                let code = envelope.error.code.or(envelope.error.error_type);
                match code {
                    Some(code) => RawApiError::with_code(status, code, envelope.error.message),
                    None => RawApiError::new(status, envelope.error.message),
                }
            }
            Err(_) => RawApiError::new(status, body.to_string()),
        };
        log::error!("[openai] API error (HTTP {status}): {}", raw.message);
        self.map_error(raw)
    }

    /// POST /chat/completions，返回第一条回答的文本
    pub(crate) async fn chat(&self, prompt: &Prompt) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: 0.2,
        };
        let payload = serde_json::to_vec(&body).map_err(|e| self.serialization_error(e))?;

        let request = self
            .client
            .post(join_url(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .body(payload);

        let ctx = RequestContext {
            provider: self.provider_name(),
            operation: "POST /chat/completions",
        };
        let (status, text) = HttpUtils::execute_request_with_retry(request, ctx, self.retry).await?;
        if !(200..300).contains(&status) {
            return Err(self.api_error(status, &text));
        }

        let response: ChatCompletionResponse = HttpUtils::parse_json(&text, self.provider_name())?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| self.parse_error("Response has no message content"))
    }

    /// GET /models，仅用于凭证校验
    pub(crate) async fn list_models(&self) -> Result<()> {
        let request = self
            .client
            .get(join_url(&self.base_url, "models"))
            .bearer_auth(&self.api_key);
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
    use crate::error::ProviderError;
    use crate::types::ProviderOptions;

    #[test]
    fn error_envelope_code_is_used() {
        let p = OpenaiProvider::new(String::new(), ProviderOptions::default());
        let body = r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert!(matches!(
            p.api_error(401, body),
            ProviderError::InvalidCredentials { raw_message: Some(m), .. } if m == "Incorrect API key"
        ));
    }

    #[test]
    fn non_json_error_body_falls_back_to_status() {
        let p = OpenaiProvider::new(String::new(), ProviderOptions::default());
        assert!(matches!(
            p.api_error(403, "<html>forbidden</html>"),
            ProviderError::PermissionDenied { .. }
        ));
    }
}
