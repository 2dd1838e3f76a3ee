//! Provider factory functions and metadata.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::TranslationProvider;
use crate::types::{ProviderCredentials, ProviderMetadata};
use crate::utils::log_sanitizer::mask_secret;

#[cfg(feature = "anthropic")]
use crate::providers::AnthropicProvider;
#[cfg(feature = "openai")]
use crate::providers::OpenaiProvider;

/// Creates a [`TranslationProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn TranslationProvider>` so it can be
/// shared by concurrent translation tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use recipe_translator_provider::{create_provider, ProviderCredentials, ProviderOptions};
///
/// let provider = create_provider(ProviderCredentials::Openai {
///     api_key: "sk-...".to_string(),
///     options: ProviderOptions::default(),
/// }).unwrap();
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn TranslationProvider>> {
    let provider: Arc<dyn TranslationProvider> = match credentials {
        #[cfg(feature = "openai")]
        ProviderCredentials::Openai { api_key, options } => {
            log::debug!("Creating openai provider (key {})", mask_secret(&api_key));
            Arc::new(OpenaiProvider::new(api_key, options))
        }
        #[cfg(feature = "anthropic")]
        ProviderCredentials::Anthropic { api_key, options } => {
            log::debug!("Creating anthropic provider (key {})", mask_secret(&api_key));
            Arc::new(AnthropicProvider::new(api_key, options))
        }
    };
    log::info!("Using {} provider, model {}", provider.id(), provider.model());
    Ok(provider)
}

/// Returns metadata for all providers enabled via feature flags.
pub fn get_all_provider_metadata() -> Vec<ProviderMetadata> {
    vec![
        #[cfg(feature = "openai")]
        OpenaiProvider::metadata(),
        #[cfg(feature = "anthropic")]
        AnthropicProvider::metadata(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProviderOptions, ProviderType};

    #[cfg(feature = "openai")]
    #[test]
    fn creates_openai_with_default_model() {
        let provider = create_provider(ProviderCredentials::Openai {
            api_key: "sk-test".to_string(),
            options: ProviderOptions::default(),
        })
        .unwrap();
        assert_eq!(provider.id(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[cfg(feature = "anthropic")]
    #[test]
    fn creates_anthropic_with_configured_model() {
        let provider = create_provider(ProviderCredentials::Anthropic {
            api_key: "sk-ant-test".to_string(),
            options: ProviderOptions {
                model: Some("claude-custom".to_string()),
                ..ProviderOptions::default()
            },
        })
        .unwrap();
        assert_eq!(provider.id(), "anthropic");
        assert_eq!(provider.model(), "claude-custom");
    }

    #[cfg(feature = "all-providers")]
    #[test]
    fn metadata_lists_enabled_providers() {
        let ids: Vec<ProviderType> = get_all_provider_metadata()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![ProviderType::Openai, ProviderType::Anthropic]);
    }
}
