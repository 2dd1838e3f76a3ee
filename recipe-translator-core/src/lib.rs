//! Recipe Translator Core Library
//!
//! Core business logic for the recipe translator:
//! - Recipe persistence (`RecipeService`)
//! - Single-field translation for `POST /translate` (`TranslationService`)
//! - Per-language translation cache with staleness detection (`TranslationCacheService`)
//! - Display sessions with an original/translated toggle (`RecipeTranslationService`)
//!
//! Storage is abstracted through traits; the platform layer injects the
//! implementations and the translation provider via [`ServiceContext`].

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{RecipeRepository, TranslationCacheStore};
