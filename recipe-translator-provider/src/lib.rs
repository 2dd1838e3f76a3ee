//! # recipe-translator-provider
//!
//! LLM translation provider abstraction for recipe content. A provider
//! translates one field group of a recipe (its name, its ingredient list or
//! its instruction list) between English and Spanish.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [OpenAI](https://platform.openai.com/) and compatible gateways | `openai` | Bearer Token |
//! | [Anthropic](https://www.anthropic.com/) | `anthropic` | `x-api-key` header |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`all-providers`** *(default)*: Enable all providers listed above.
//! - **`openai`**: Enable only the OpenAI-compatible provider.
//! - **`anthropic`**: Enable only the Anthropic provider.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Translation Rules
//!
//! Spanish output always uses Castilian (Spain) terminology; English output
//! uses US conventions. Ingredient amounts and units are never translated:
//! they are copied from the source regardless of what the model returns.
//! List answers must keep the source's item count, otherwise the call fails
//! with [`ProviderError::ParseError`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recipe_translator_provider::{
//!     create_provider, Ingredient, Language, ProviderCredentials, ProviderOptions,
//!     TranslatableContent, TranslationRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = create_provider(ProviderCredentials::Openai {
//!         api_key: "sk-...".to_string(),
//!         options: ProviderOptions::default(),
//!     })?;
//!
//!     let request = TranslationRequest::new(
//!         TranslatableContent::Ingredients(vec![Ingredient::new("potato", 3_u32, "")]),
//!         Language::En,
//!         Language::Es,
//!     );
//!     let translated = provider.translate(&request).await?;
//!     println!("{}", translated.to_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::ParseError`]: the model's answer could not be used
//! - [`ProviderError::RateLimited`]: API rate limit exceeded (retryable)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff when [`ProviderOptions::max_retries`] is non-zero.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::{create_provider, get_all_provider_metadata};

// Re-export core trait only (internal traits are not exported)
pub use traits::TranslationProvider;

// Re-export types
pub use types::{
    Amount, ContentType, CredentialValidationError, FieldType, Ingredient, Language,
    ProviderCredentialField, ProviderCredentials, ProviderMetadata, ProviderOptions, ProviderType,
    TranslatableContent, TranslationRequest,
};

// Prompt and answer handling, for custom providers
pub use providers::common::parse_translation;
pub use providers::prompt::{Prompt, build_prompt};

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "openai")]
pub use providers::OpenaiProvider;

#[cfg(feature = "anthropic")]
pub use providers::AnthropicProvider;
