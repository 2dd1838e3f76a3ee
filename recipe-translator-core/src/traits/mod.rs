//! Storage layer abstraction trait definition

mod recipe_repository;
mod translation_cache_store;

pub use recipe_repository::RecipeRepository;
pub use translation_cache_store::TranslationCacheStore;
