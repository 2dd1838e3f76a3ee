//! `TranslationCacheStore` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use recipe_translator_core::error::{CoreError, CoreResult};
use recipe_translator_core::traits::TranslationCacheStore;
use recipe_translator_core::types::{Language, TranslationCache};
use recipe_translator_core::utils::datetime;

use super::entity::translation_cache;
use super::{SqliteStore, from_json, to_json};

impl translation_cache::Model {
    fn into_entry(self) -> CoreResult<TranslationCache> {
        let language = Language::from_code(&self.language).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid language: {}", self.language))
        })?;
        let translated_at = datetime::parse(&self.translated_at).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid translated_at: {}", self.translated_at))
        })?;

        Ok(TranslationCache {
            name: self.name.map(|v| from_json("name", &v)).transpose()?,
            ingredients: self
                .ingredients
                .map(|v| from_json("ingredients", &v))
                .transpose()?,
            instructions: self
                .instructions
                .map(|v| from_json("instructions", &v))
                .transpose()?,
            recipe_id: self.recipe_id,
            language,
            translated_at,
        })
    }
}

fn entry_to_active_model(entry: &TranslationCache) -> CoreResult<translation_cache::ActiveModel> {
    Ok(translation_cache::ActiveModel {
        recipe_id: Set(entry.recipe_id.clone()),
        language: Set(entry.language.code().to_string()),
        name: Set(entry.name.as_ref().map(to_json).transpose()?),
        ingredients: Set(entry.ingredients.as_ref().map(to_json).transpose()?),
        instructions: Set(entry.instructions.as_ref().map(to_json).transpose()?),
        translated_at: Set(datetime::format(&entry.translated_at)),
    })
}

fn key(recipe_id: &str, language: Language) -> (String, String) {
    (recipe_id.to_string(), language.code().to_string())
}

#[async_trait]
impl TranslationCacheStore for SqliteStore {
    async fn find(
        &self,
        recipe_id: &str,
        language: Language,
    ) -> CoreResult<Option<TranslationCache>> {
        let row = translation_cache::Entity::find_by_id(key(recipe_id, language))
            .one(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to query translation cache: {e}"))
            })?;

        row.map(translation_cache::Model::into_entry).transpose()
    }

    async fn find_by_recipe(&self, recipe_id: &str) -> CoreResult<Vec<TranslationCache>> {
        let rows = translation_cache::Entity::find()
            .filter(translation_cache::Column::RecipeId.eq(recipe_id))
            .order_by_asc(translation_cache::Column::Language)
            .all(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to query translation cache: {e}"))
            })?;

        rows.into_iter()
            .map(translation_cache::Model::into_entry)
            .collect()
    }

    async fn save(&self, entry: &TranslationCache) -> CoreResult<()> {
        let active_model = entry_to_active_model(entry)?;

        translation_cache::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    translation_cache::Column::RecipeId,
                    translation_cache::Column::Language,
                ])
                .update_columns([
                    translation_cache::Column::Name,
                    translation_cache::Column::Ingredients,
                    translation_cache::Column::Instructions,
                    translation_cache::Column::TranslatedAt,
                ])
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to save translation cache: {e}"))
            })?;

        Ok(())
    }

    async fn delete(&self, recipe_id: &str, language: Language) -> CoreResult<bool> {
        let result = translation_cache::Entity::delete_by_id(key(recipe_id, language))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to delete translation cache: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_by_recipe(&self, recipe_id: &str) -> CoreResult<()> {
        translation_cache::Entity::delete_many()
            .filter(translation_cache::Column::RecipeId.eq(recipe_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to delete translation cache: {e}"))
            })?;

        Ok(())
    }
}
