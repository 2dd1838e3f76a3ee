//! 食谱相关类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recipe_translator_provider::{ContentType, Ingredient, Language, TranslatableContent};

/// 食谱类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecipeType {
    /// 烹饪
    #[default]
    Cooking,
    /// 清洁
    Cleaning,
    /// 购物清单
    Shopping,
}

impl RecipeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cooking => "cooking",
            Self::Cleaning => "cleaning",
            Self::Shopping => "shopping",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cooking" => Some(Self::Cooking),
            "cleaning" => Some(Self::Cleaning),
            "shopping" => Some(Self::Shopping),
            _ => None,
        }
    }
}

/// The translatable fields of a recipe, original or translated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeContent {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeContent {
    /// One field group as translatable content.
    pub fn field(&self, content_type: ContentType) -> TranslatableContent {
        match content_type {
            ContentType::Name => TranslatableContent::Text(self.name.clone()),
            ContentType::Ingredients => TranslatableContent::Ingredients(self.ingredients.clone()),
            ContentType::Instructions => {
                TranslatableContent::Instructions(self.instructions.clone())
            }
        }
    }
}

/// 食谱
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// 食谱 ID (UUID)
    pub id: String,
    /// 食谱名称
    pub name: String,
    /// 食谱类型
    #[serde(default)]
    pub recipe_type: RecipeType,
    /// 创作语言，创建时确定，之后不再变化
    pub original_language: Language,
    /// 配料（有序）
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// 步骤（有序）
    #[serde(default)]
    pub instructions: Vec<String>,
    /// 创建时间
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
    /// 更新时间
    #[serde(with = "crate::utils::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// The current source content of one field group.
    pub fn content(&self, content_type: ContentType) -> TranslatableContent {
        match content_type {
            ContentType::Name => TranslatableContent::Text(self.name.clone()),
            ContentType::Ingredients => TranslatableContent::Ingredients(self.ingredients.clone()),
            ContentType::Instructions => {
                TranslatableContent::Instructions(self.instructions.clone())
            }
        }
    }

    /// The original fields, as displayed when no translation is shown.
    pub fn original_content(&self) -> RecipeContent {
        RecipeContent {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

/// 创建食谱请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    /// 食谱名称
    pub name: String,
    /// 食谱类型
    #[serde(default)]
    pub recipe_type: RecipeType,
    /// 创作语言
    pub original_language: Language,
    /// 配料
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// 步骤
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// 更新食谱请求（未提供的字段保持不变；创作语言不可修改）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecipeRequest {
    /// 新名称（可选）
    pub name: Option<String>,
    /// 新类型（可选）
    pub recipe_type: Option<RecipeType>,
    /// 新配料（可选，整体替换）
    pub ingredients: Option<Vec<Ingredient>>,
    /// 新步骤（可选，整体替换）
    pub instructions: Option<Vec<String>>,
}
