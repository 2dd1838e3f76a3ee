//! 翻译缓存存储抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{Language, TranslationCache};

/// Translation cache store, keyed by `(recipe_id, language)`
///
/// Kept apart from [`RecipeRepository`](super::RecipeRepository): writing a
/// translation never touches the recipe record. Writes are last-write-wins.
#[async_trait]
pub trait TranslationCacheStore: Send + Sync {
    /// Get the entry for one recipe and language
    ///
    /// # Returns
    /// * `None` - not yet translated into `language`
    async fn find(&self, recipe_id: &str, language: Language)
    -> CoreResult<Option<TranslationCache>>;

    /// All entries of a recipe
    async fn find_by_recipe(&self, recipe_id: &str) -> CoreResult<Vec<TranslationCache>>;

    /// Insert or replace the entry for `(entry.recipe_id, entry.language)`
    async fn save(&self, entry: &TranslationCache) -> CoreResult<()>;

    /// Remove one entry
    ///
    /// # Returns
    /// * `true` if an entry was removed
    async fn delete(&self, recipe_id: &str, language: Language) -> CoreResult<bool>;

    /// Remove every entry of a recipe (recipe deletion)
    async fn delete_by_recipe(&self, recipe_id: &str) -> CoreResult<()>;
}
