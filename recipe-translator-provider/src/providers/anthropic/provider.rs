//! Anthropic TranslationProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::parse_translation;
use crate::providers::prompt::build_prompt;
use crate::traits::{ProviderErrorMapper, TranslationProvider};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderMetadata, ProviderType, TranslatableContent,
    TranslationRequest,
};

use super::{ANTHROPIC_DEFAULT_MODEL, AnthropicProvider};

#[async_trait]
impl TranslationProvider for AnthropicProvider {
    fn id(&self) -> &'static str {
        "anthropic"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Anthropic,
            name: "Anthropic".to_string(),
            description: "Anthropic Messages API".to_string(),
            default_model: ANTHROPIC_DEFAULT_MODEL.to_string(),
            required_fields: vec![ProviderCredentialField {
                key: "apiKey".to_string(),
                label: "API Key".to_string(),
                field_type: FieldType::Password,
                placeholder: Some("sk-ant-...".to_string()),
                help_text: None,
            }],
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(()) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. }) => {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn translate(&self, req: &TranslationRequest) -> Result<TranslatableContent> {
        let prompt = build_prompt(&req.content, req.source_language, req.target_language);
        log::debug!(
            "[anthropic] translating {} {} -> {} with {}",
            req.content_type,
            req.source_language,
            req.target_language,
            self.model
        );
        let answer = self.complete(&prompt).await?;
        parse_translation(self.provider_name(), &req.content, &answer)
    }
}
