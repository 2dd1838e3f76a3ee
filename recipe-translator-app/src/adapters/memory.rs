//! In-memory store for tests and `database.in_memory = true`.
//!
//! Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use recipe_translator_core::error::CoreResult;
use recipe_translator_core::traits::{RecipeRepository, TranslationCacheStore};
use recipe_translator_core::types::{Language, Recipe, TranslationCache};

/// Implements both `RecipeRepository` and `TranslationCacheStore`.
#[derive(Default)]
pub struct InMemoryStore {
    recipes: RwLock<HashMap<String, Recipe>>,
    translations: RwLock<HashMap<(String, Language), TranslationCache>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn find_all(&self) -> CoreResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self.recipes.read().await.values().cloned().collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Recipe>> {
        Ok(self.recipes.read().await.get(id).cloned())
    }

    async fn save(&self, recipe: &Recipe) -> CoreResult<()> {
        self.recipes
            .write()
            .await
            .insert(recipe.id.clone(), recipe.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        Ok(self.recipes.write().await.remove(id).is_some())
    }
}

#[async_trait]
impl TranslationCacheStore for InMemoryStore {
    async fn find(
        &self,
        recipe_id: &str,
        language: Language,
    ) -> CoreResult<Option<TranslationCache>> {
        Ok(self
            .translations
            .read()
            .await
            .get(&(recipe_id.to_string(), language))
            .cloned())
    }

    async fn find_by_recipe(&self, recipe_id: &str) -> CoreResult<Vec<TranslationCache>> {
        let mut entries: Vec<TranslationCache> = self
            .translations
            .read()
            .await
            .values()
            .filter(|e| e.recipe_id == recipe_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.language);
        Ok(entries)
    }

    async fn save(&self, entry: &TranslationCache) -> CoreResult<()> {
        self.translations
            .write()
            .await
            .insert((entry.recipe_id.clone(), entry.language), entry.clone());
        Ok(())
    }

    async fn delete(&self, recipe_id: &str, language: Language) -> CoreResult<bool> {
        Ok(self
            .translations
            .write()
            .await
            .remove(&(recipe_id.to_string(), language))
            .is_some())
    }

    async fn delete_by_recipe(&self, recipe_id: &str) -> CoreResult<()> {
        self.translations
            .write()
            .await
            .retain(|(id, _), _| id != recipe_id);
        Ok(())
    }
}
