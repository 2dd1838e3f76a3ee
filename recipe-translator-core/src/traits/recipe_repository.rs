//! Recipe persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Recipe;

/// Recipe Repository Trait
///
/// Platform implementation:
/// - `InMemoryStore` (tests, `database.in_memory = true`)
/// - `SqliteStore` (`SeaORM`)
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Get all recipes, newest first
    async fn find_all(&self) -> CoreResult<Vec<Recipe>>;

    /// Get recipe based on ID
    ///
    /// # Arguments
    /// * `id` - Recipe ID
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Recipe>>;

    /// Save recipe (new or update)
    ///
    /// # Arguments
    /// * `recipe` - Recipe data
    async fn save(&self, recipe: &Recipe) -> CoreResult<()>;

    /// Delete recipe
    ///
    /// # Returns
    /// * `true` if a recipe was removed
    async fn delete(&self, id: &str) -> CoreResult<bool>;
}
