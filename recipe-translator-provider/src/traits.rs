use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{ProviderMetadata, TranslatableContent, TranslationRequest};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status of the failed call
    pub status: u16,
    /// 错误码 / 错误类型（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：序列化错误
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 翻译提供商 Trait
///
/// A provider turns one [`TranslationRequest`] (a single field group of a
/// recipe) into translated content of the same shape.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取 Provider 元数据（类型级别）
    fn metadata() -> ProviderMetadata
    where
        Self: Sized;

    /// Model name this instance sends requests to.
    fn model(&self) -> &str;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// 翻译单个字段组
    ///
    /// The returned content has the same variant as `req.content`; list
    /// content keeps its length and order, and ingredient amounts/units are
    /// carried over from the source.
    ///
    /// # Errors
    /// `ProviderError::ParseError` when the model's answer is empty, not
    /// JSON where JSON is required, or has the wrong number of items.
    async fn translate(&self, req: &TranslationRequest) -> Result<TranslatableContent>;
}
