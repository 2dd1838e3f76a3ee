//! 翻译缓存与展示状态类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recipe_translator_provider::{ContentType, Ingredient, Language, TranslatableContent};

use super::RecipeContent;

/// A cached translated field plus the fingerprint of the source it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedField<T> {
    pub value: T,
    /// `content_hash` of the source content at translation time
    pub source_hash: String,
}

impl<T> CachedField<T> {
    pub fn new(value: T, source_hash: String) -> Self {
        Self { value, source_hash }
    }
}

/// 翻译缓存（按 `(recipe_id, language)` 存储，独立于食谱记录）
///
/// An entry exists only after at least one successful translation into
/// `language`. Fields are overwritten in place by later translations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationCache {
    pub recipe_id: String,
    pub language: Language,
    /// Only written when the cache policy persists names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CachedField<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<CachedField<Vec<Ingredient>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<CachedField<Vec<String>>>,
    /// 最后写入时间（仅供参考，不参与失效判断）
    #[serde(with = "crate::utils::datetime")]
    pub translated_at: DateTime<Utc>,
}

impl TranslationCache {
    /// Empty entry stamped with the current time.
    pub fn new(recipe_id: impl Into<String>, language: Language) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            language,
            name: None,
            ingredients: None,
            instructions: None,
            translated_at: Utc::now(),
        }
    }

    /// Store translated content under its content type.
    pub fn set(&mut self, content: TranslatableContent, source_hash: String) {
        match content {
            TranslatableContent::Text(name) => {
                self.name = Some(CachedField::new(name, source_hash));
            }
            TranslatableContent::Ingredients(items) => {
                self.ingredients = Some(CachedField::new(items, source_hash));
            }
            TranslatableContent::Instructions(steps) => {
                self.instructions = Some(CachedField::new(steps, source_hash));
            }
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, content: TranslatableContent, source_hash: String) -> Self {
        self.set(content, source_hash);
        self
    }

    /// Cached content of one field group, regardless of freshness.
    pub fn content(&self, content_type: ContentType) -> Option<TranslatableContent> {
        match content_type {
            ContentType::Name => self
                .name
                .as_ref()
                .map(|f| TranslatableContent::Text(f.value.clone())),
            ContentType::Ingredients => self
                .ingredients
                .as_ref()
                .map(|f| TranslatableContent::Ingredients(f.value.clone())),
            ContentType::Instructions => self
                .instructions
                .as_ref()
                .map(|f| TranslatableContent::Instructions(f.value.clone())),
        }
    }

    pub fn source_hash(&self, content_type: ContentType) -> Option<&str> {
        match content_type {
            ContentType::Name => self.name.as_ref().map(|f| f.source_hash.as_str()),
            ContentType::Ingredients => self.ingredients.as_ref().map(|f| f.source_hash.as_str()),
            ContentType::Instructions => {
                self.instructions.as_ref().map(|f| f.source_hash.as_str())
            }
        }
    }

    /// Content types present in this entry.
    pub fn cached_types(&self) -> Vec<ContentType> {
        ContentType::ALL
            .into_iter()
            .filter(|ct| self.source_hash(*ct).is_some())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.ingredients.is_none() && self.instructions.is_none()
    }

    /// Overlay the fields present in `newer`; absent fields are kept.
    /// `translated_at` is taken from `newer`.
    pub fn merge_from(&mut self, newer: Self) {
        if newer.name.is_some() {
            self.name = newer.name;
        }
        if newer.ingredients.is_some() {
            self.ingredients = newer.ingredients;
        }
        if newer.instructions.is_some() {
            self.instructions = newer.instructions;
        }
        self.translated_at = newer.translated_at;
    }
}

/// Which translated fields get persisted, per write path.
///
/// The default persists ingredients and instructions from both paths and
/// keeps the translated name in the session only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct CachePolicy {
    /// Fields a [`TranslationSession`](crate::services::TranslationSession) writes after translating.
    pub session_fields: Vec<ContentType>,
    /// Fields `POST /translate` merges when given a recipe id.
    pub endpoint_fields: Vec<ContentType>,
    /// Treat cached fields whose source hash no longer matches as absent.
    pub check_freshness: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            session_fields: vec![ContentType::Ingredients, ContentType::Instructions],
            endpoint_fields: vec![ContentType::Ingredients, ContentType::Instructions],
            check_freshness: true,
        }
    }
}

impl CachePolicy {
    pub fn persists_in_session(&self, content_type: ContentType) -> bool {
        self.session_fields.contains(&content_type)
    }

    pub fn persists_from_endpoint(&self, content_type: ContentType) -> bool {
        self.endpoint_fields.contains(&content_type)
    }
}

/// Result of a best-effort cache write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CacheWriteStatus {
    /// Entry written.
    Written,
    /// Nothing to write.
    Skipped { reason: String },
    /// The write failed; the translation itself is unaffected.
    Failed { message: String },
}

impl CacheWriteStatus {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}

/// 展示状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    /// 显示原文
    Original,
    /// 翻译请求进行中
    Translating,
    /// 显示译文
    Translated,
}

/// What a consumer renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayData {
    /// Language of the displayed content.
    pub language: Language,
    pub is_translation: bool,
    #[serde(flatten)]
    pub content: RecipeContent,
}

/// Point-in-time view of a translation session.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub recipe_id: String,
    pub state: DisplayState,
    /// `false` when the recipe is already in the active language.
    pub toggle_available: bool,
    pub data: DisplayData,
}

/// A cache entry together with the fields that no longer match the recipe.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedTranslation {
    #[serde(flatten)]
    pub entry: TranslationCache,
    pub stale: Vec<ContentType>,
}

/// `POST /translate` 请求体
///
/// Every field is optional at the wire level so that missing ones can be
/// reported as a validation error instead of a decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateFieldRequest {
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub target_language: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
}

/// `POST /translate` 响应体
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslateFieldResponse {
    /// Plain string for names, array for ingredients / instructions.
    pub translated: serde_json::Value,
    pub cache_status: CacheWriteStatus,
}
