//! `RecipeRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait, QueryOrder};

use recipe_translator_core::error::{CoreError, CoreResult};
use recipe_translator_core::traits::RecipeRepository;
use recipe_translator_core::types::{Language, Recipe, RecipeType};
use recipe_translator_core::utils::datetime;

use super::entity::recipe;
use super::{SqliteStore, from_json, to_json};

impl recipe::Model {
    /// Convert a `SeaORM` row model into a domain `Recipe`.
    ///
    /// String-backed fields are parsed into strongly typed values.
    fn into_recipe(self) -> CoreResult<Recipe> {
        let recipe_type = RecipeType::parse(&self.recipe_type).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid recipe_type: {}", self.recipe_type))
        })?;
        let original_language = Language::from_code(&self.original_language).ok_or_else(|| {
            CoreError::SerializationError(format!(
                "Invalid original_language: {}",
                self.original_language
            ))
        })?;
        let created_at = datetime::parse(&self.created_at).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid created_at: {}", self.created_at))
        })?;
        let updated_at = datetime::parse(&self.updated_at).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid updated_at: {}", self.updated_at))
        })?;

        Ok(Recipe {
            ingredients: from_json("ingredients", &self.ingredients)?,
            instructions: from_json("instructions", &self.instructions)?,
            id: self.id,
            name: self.name,
            recipe_type,
            original_language,
            created_at,
            updated_at,
        })
    }
}

/// Convert a domain `Recipe` into a `SeaORM` active model for upsert.
fn recipe_to_active_model(recipe: &Recipe) -> CoreResult<recipe::ActiveModel> {
    Ok(recipe::ActiveModel {
        id: Set(recipe.id.clone()),
        name: Set(recipe.name.clone()),
        recipe_type: Set(recipe.recipe_type.as_str().to_string()),
        original_language: Set(recipe.original_language.code().to_string()),
        ingredients: Set(to_json(&recipe.ingredients)?),
        instructions: Set(to_json(&recipe.instructions)?),
        created_at: Set(datetime::format(&recipe.created_at)),
        updated_at: Set(datetime::format(&recipe.updated_at)),
    })
}

#[async_trait]
impl RecipeRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Recipe>> {
        let rows = recipe::Entity::find()
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query recipes: {e}")))?;

        rows.into_iter().map(recipe::Model::into_recipe).collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<Recipe>> {
        let row = recipe::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query recipe: {e}")))?;

        row.map(recipe::Model::into_recipe).transpose()
    }

    async fn save(&self, recipe: &Recipe) -> CoreResult<()> {
        let active_model = recipe_to_active_model(recipe)?;

        // original_language and created_at are fixed at creation
        recipe::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(recipe::Column::Id)
                    .update_columns([
                        recipe::Column::Name,
                        recipe::Column::RecipeType,
                        recipe::Column::Ingredients,
                        recipe::Column::Instructions,
                        recipe::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save recipe: {e}")))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<bool> {
        let result = recipe::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete recipe: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
