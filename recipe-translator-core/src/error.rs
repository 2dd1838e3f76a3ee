//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use recipe_translator_provider::{CredentialValidationError, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required request field (content, target language, content type) is missing
    #[error("Missing required parameters")]
    MissingParameters,

    /// Language code outside the supported pair
    #[error("Unsupported target language: {0}")]
    UnsupportedLanguage(String),

    /// Content type other than name / ingredients / instructions
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// Content does not have the shape its content type requires
    #[error("Invalid content for content type: {0}")]
    InvalidContent(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Recipe not found
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Provider configuration rejected (missing API key etc.)
    #[error("{0}")]
    CredentialValidation(CredentialValidationError),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::MissingParameters
            | Self::UnsupportedLanguage(_)
            | Self::UnsupportedContentType(_)
            | Self::InvalidContent(_)
            | Self::ValidationError(_)
            | Self::RecipeNotFound(_)
            | Self::CredentialValidation(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::StorageError(_) | Self::SerializationError(_) => false,
        }
    }

    /// Whether the error was raised while validating input, before any
    /// provider call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingParameters
                | Self::UnsupportedLanguage(_)
                | Self::UnsupportedContentType(_)
                | Self::InvalidContent(_)
                | Self::ValidationError(_)
        )
    }
}

impl From<CredentialValidationError> for CoreError {
    fn from(e: CredentialValidationError) -> Self {
        Self::CredentialValidation(e)
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
