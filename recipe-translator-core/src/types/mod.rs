//! 类型定义模块

mod recipe;
mod response;
mod translation;

pub use recipe::{CreateRecipeRequest, Recipe, RecipeContent, RecipeType, UpdateRecipeRequest};
pub use response::{ApiResponse, ErrorBody};
pub use translation::{
    CachePolicy, CacheWriteStatus, CachedField, CachedTranslation, DisplayData, DisplayState,
    SessionSnapshot, TranslateFieldRequest, TranslateFieldResponse, TranslationCache,
};

// Re-export provider 库的公共类型
pub use recipe_translator_provider::{
    Amount, ContentType, Ingredient, Language, ProviderCredentials, ProviderMetadata,
    ProviderOptions, ProviderType, TranslatableContent, TranslationRequest,
};
