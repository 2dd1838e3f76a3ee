//! OpenAI TranslationProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::parse_translation;
use crate::providers::prompt::build_prompt;
use crate::traits::{ProviderErrorMapper, TranslationProvider};
use crate::types::{
    FieldType, ProviderCredentialField, ProviderMetadata, ProviderType, TranslatableContent,
    TranslationRequest,
};

use super::{OPENAI_DEFAULT_MODEL, OpenaiProvider};

#[async_trait]
impl TranslationProvider for OpenaiProvider {
    fn id(&self) -> &'static str {
        "openai"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Openai,
            name: "OpenAI".to_string(),
            description: "OpenAI-compatible chat completions API".to_string(),
            default_model: OPENAI_DEFAULT_MODEL.to_string(),
            required_fields: vec![ProviderCredentialField {
                key: "apiKey".to_string(),
                label: "API Key".to_string(),
                field_type: FieldType::Password,
                placeholder: Some("sk-...".to_string()),
                help_text: Some("Create a key at platform.openai.com/api-keys".to_string()),
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
            "[openai] translating {} {} -> {} with {}",
            req.content_type,
            req.source_language,
            req.target_language,
            self.model
        );
        let answer = self.chat(&prompt).await?;
        parse_translation(self.provider_name(), &req.content, &answer)
    }
}
