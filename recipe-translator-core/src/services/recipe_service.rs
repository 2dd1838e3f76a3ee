//! 食谱管理服务

use std::sync::Arc;

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, TranslationCacheService};
use crate::types::{CreateRecipeRequest, Ingredient, Recipe, UpdateRecipeRequest};

/// 名称最大长度（字符）
const MAX_NAME_LEN: usize = 200;

/// 食谱管理服务
pub struct RecipeService {
    ctx: Arc<ServiceContext>,
}

impl RecipeService {
    /// 创建食谱服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 列出所有食谱
    pub async fn list_recipes(&self) -> CoreResult<Vec<Recipe>> {
        self.ctx.recipe_repository().find_all().await
    }

    /// 获取食谱（不存在时返回 `RecipeNotFound`）
    pub async fn get_recipe(&self, recipe_id: &str) -> CoreResult<Recipe> {
        self.ctx
            .recipe_repository()
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| CoreError::RecipeNotFound(recipe_id.to_string()))
    }

    /// 创建食谱
    pub async fn create_recipe(&self, request: CreateRecipeRequest) -> CoreResult<Recipe> {
        let name = validate_name(&request.name)?;
        validate_ingredients(&request.ingredients)?;

        let now = Utc::now();
        let recipe = Recipe {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            recipe_type: request.recipe_type,
            original_language: request.original_language,
            ingredients: request.ingredients,
            instructions: request.instructions,
            created_at: now,
            updated_at: now,
        };

        self.ctx.recipe_repository().save(&recipe).await?;
        log::info!(
            "Recipe created: {} ({}, {})",
            recipe.id,
            recipe.recipe_type.as_str(),
            recipe.original_language
        );
        Ok(recipe)
    }

    /// 更新食谱
    ///
    /// Cached translations are left in place; fields whose source changed
    /// become stale through their content hash.
    pub async fn update_recipe(
        &self,
        recipe_id: &str,
        request: UpdateRecipeRequest,
    ) -> CoreResult<Recipe> {
        let mut recipe = self.get_recipe(recipe_id).await?;

        if let Some(name) = request.name {
            recipe.name = validate_name(&name)?;
        }
        if let Some(recipe_type) = request.recipe_type {
            recipe.recipe_type = recipe_type;
        }
        if let Some(ingredients) = request.ingredients {
            validate_ingredients(&ingredients)?;
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = request.instructions {
            recipe.instructions = instructions;
        }
        recipe.updated_at = Utc::now();

        self.ctx.recipe_repository().save(&recipe).await?;
        Ok(recipe)
    }

    /// 删除食谱及其全部翻译缓存
    pub async fn delete_recipe(&self, recipe_id: &str) -> CoreResult<()> {
        if !self.ctx.recipe_repository().delete(recipe_id).await? {
            return Err(CoreError::RecipeNotFound(recipe_id.to_string()));
        }

        // 缓存清理失败不影响删除结果，孤立条目不会再被读取
        if let Err(e) = TranslationCacheService::new(Arc::clone(&self.ctx))
            .remove_recipe(recipe_id)
            .await
        {
            log::warn!("Failed to remove cached translations of recipe {recipe_id}: {e}");
        }

        log::info!("Recipe deleted: {recipe_id}");
        Ok(())
    }
}

fn validate_name(name: &str) -> CoreResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::ValidationError(
            "Recipe name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::ValidationError(format!(
            "Recipe name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn validate_ingredients(ingredients: &[Ingredient]) -> CoreResult<()> {
    if let Some(i) = ingredients.iter().position(|item| item.name.trim().is_empty()) {
        return Err(CoreError::ValidationError(format!(
            "Ingredient {i} has an empty name"
        )));
    }
    Ok(())
}
