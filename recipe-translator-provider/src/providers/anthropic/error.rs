//! Anthropic error mapping

use crate::error::ProviderError;
use crate::traits::{ProviderErrorMapper, RawApiError};

use super::AnthropicProvider;

/// Anthropic error type mapping
/// Reference: <https://docs.anthropic.com/en/api/errors>
impl ProviderErrorMapper for AnthropicProvider {
    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn map_error(&self, raw: RawApiError) -> ProviderError {
        match raw.code.as_deref() {
            Some("authentication_error") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("permission_error") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("not_found_error") => ProviderError::ModelNotFound {
                provider: self.provider_name().to_string(),
                model: self.model.clone(),
                raw_message: Some(raw.message),
            },

            // 余额不足时 Anthropic 返回 400 invalid_request_error，只能看消息内容
            Some("invalid_request_error") if raw.message.contains("credit balance") => {
                ProviderError::QuotaExceeded {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            Some("invalid_request_error" | "request_too_large") => {
                ProviderError::InvalidParameter {
                    provider: self.provider_name().to_string(),
                    param: "request".to_string(),
                    detail: raw.message,
                }
            }

            Some("rate_limit_error") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            Some("overloaded_error" | "api_error") => ProviderError::NetworkError {
                provider: self.provider_name().to_string(),
                detail: raw.message,
            },

            // 没有错误体时按状态码兜底
            None if raw.status == 401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },
            None if raw.status == 403 => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
