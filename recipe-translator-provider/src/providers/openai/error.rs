//! OpenAI error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::OpenaiProvider;

/// OpenAI error mapping
/// Reference: <https://platform.openai.com/docs/guides/error-codes>
impl ProviderErrorMapper for OpenaiProvider {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match (raw.status, raw.code.as_deref()) {
            // 余额 / 额度耗尽，OpenAI 也用 429 返回
            (_, Some("insufficient_quota")) => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            (_, Some("model_not_found")) | (404, _) => ProviderError::ModelNotFound {
                provider: self.provider_name().to_string(),
                model: self.model.clone(),
                raw_message: Some(raw.message),
            },

            (401, _) | (_, Some("invalid_api_key")) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            (403, _) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            (400 | 413 | 422, code) => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: code.unwrap_or("request").to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
