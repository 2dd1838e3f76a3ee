//! 翻译缓存服务
//!
//! Read side: freshness-checked lookup. Write side: field merge into the
//! `(recipe_id, language)` entry, serialized per entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{
    CachedTranslation, ContentType, Language, Recipe, RecipeContent, TranslatableContent,
    TranslationCache,
};
use crate::utils::content_hash::content_hash;

/// 翻译缓存服务
pub struct TranslationCacheService {
    ctx: Arc<ServiceContext>,
}

impl TranslationCacheService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Whether `entry` holds `content_type` translated from the recipe's
    /// current content. With freshness checking disabled any cached field counts.
    pub fn is_fresh(&self, recipe: &Recipe, entry: &TranslationCache, content_type: ContentType) -> bool {
        let Some(hash) = entry.source_hash(content_type) else {
            return false;
        };
        !self.ctx.cache_policy().check_freshness || hash == content_hash(&recipe.content(content_type))
    }

    /// Cached content of one field, or `None` when absent or stale.
    pub fn fresh_content(
        &self,
        recipe: &Recipe,
        entry: &TranslationCache,
        content_type: ContentType,
    ) -> Option<TranslatableContent> {
        if self.is_fresh(recipe, entry, content_type) {
            entry.content(content_type)
        } else {
            None
        }
    }

    /// Cached fields whose source has changed since they were translated.
    pub fn stale_fields(&self, recipe: &Recipe, entry: &TranslationCache) -> Vec<ContentType> {
        entry
            .cached_types()
            .into_iter()
            .filter(|ct| entry.source_hash(*ct) != Some(content_hash(&recipe.content(*ct)).as_str()))
            .collect()
    }

    /// Build a displayable translation from a cache entry.
    ///
    /// Succeeds only when every field the session policy persists is cached
    /// and fresh. Fields outside the policy come from the cache when fresh,
    /// otherwise from the original recipe.
    pub fn adopt(&self, recipe: &Recipe, entry: &TranslationCache) -> Option<RecipeContent> {
        let required = &self.ctx.cache_policy().session_fields;
        if required.is_empty() || !required.iter().all(|ct| self.is_fresh(recipe, entry, *ct)) {
            return None;
        }

        let pick = |ct| {
            self.fresh_content(recipe, entry, ct)
                .unwrap_or_else(|| recipe.content(ct))
        };
        match (
            pick(ContentType::Name),
            pick(ContentType::Ingredients),
            pick(ContentType::Instructions),
        ) {
            (
                TranslatableContent::Text(name),
                TranslatableContent::Ingredients(ingredients),
                TranslatableContent::Instructions(instructions),
            ) => Some(RecipeContent {
                name,
                ingredients,
                instructions,
            }),
            _ => None,
        }
    }

    /// 读取缓存条目
    pub async fn lookup(
        &self,
        recipe_id: &str,
        language: Language,
    ) -> CoreResult<Option<TranslationCache>> {
        self.ctx.cache_store().find(recipe_id, language).await
    }

    /// Merge `entry`'s fields into the stored entry and save it.
    ///
    /// Merges into the same `(recipe_id, language)` run one at a time, so
    /// concurrent writers of different fields all keep their field.
    pub async fn merge(&self, entry: TranslationCache) -> CoreResult<TranslationCache> {
        let lock = self
            .ctx
            .cache_entry_lock(&entry.recipe_id, entry.language)
            .await;
        let _guard = lock.lock().await;

        let store = self.ctx.cache_store();
        let mut current = store
            .find(&entry.recipe_id, entry.language)
            .await?
            .unwrap_or_else(|| TranslationCache::new(entry.recipe_id.clone(), entry.language));
        current.merge_from(entry);
        store.save(&current).await?;
        log::debug!(
            "Cached translation of recipe {} ({}): {:?}",
            current.recipe_id,
            current.language,
            current.cached_types()
        );
        Ok(current)
    }

    /// The translations map of a recipe with per-field staleness
    pub async fn list_for_recipe(
        &self,
        recipe: &Recipe,
    ) -> CoreResult<BTreeMap<Language, CachedTranslation>> {
        let entries = self.ctx.cache_store().find_by_recipe(&recipe.id).await?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let stale = self.stale_fields(recipe, &entry);
                (entry.language, CachedTranslation { entry, stale })
            })
            .collect())
    }

    /// 删除单个语言的缓存
    pub async fn invalidate(&self, recipe_id: &str, language: Language) -> CoreResult<bool> {
        let removed = self.ctx.cache_store().delete(recipe_id, language).await?;
        if removed {
            log::info!("Invalidated cached translation of recipe {recipe_id} ({language})");
        }
        Ok(removed)
    }

    /// 删除食谱的全部缓存
    pub async fn remove_recipe(&self, recipe_id: &str) -> CoreResult<()> {
        self.ctx.cache_store().delete_by_recipe(recipe_id).await
    }
}
