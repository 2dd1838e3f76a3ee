//! 翻译服务
//!
//! Validates `POST /translate` input, calls the provider, and fans a whole
//! recipe out into three concurrent field translations.

use std::sync::Arc;

use futures::future::join3;
use recipe_translator_provider::{ProviderError, TranslationRequest};

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, TranslationCacheService};
use crate::types::{
    CacheWriteStatus, ContentType, Language, Recipe, RecipeContent, TranslatableContent,
    TranslateFieldRequest, TranslateFieldResponse, TranslationCache,
};
use crate::utils::content_hash::content_hash;

/// A `POST /translate` body that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTranslateRequest {
    pub content: TranslatableContent,
    pub target_language: Language,
    /// Explicit source language, if the caller sent one.
    pub source_language: Option<Language>,
    pub recipe_id: Option<String>,
}

/// 翻译服务
pub struct TranslationService {
    ctx: Arc<ServiceContext>,
}

impl TranslationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Check a raw request before any provider call.
    ///
    /// Order: missing fields, target language, content type, source
    /// language, content shape.
    pub fn validate_request(request: TranslateFieldRequest) -> CoreResult<ValidatedTranslateRequest> {
        let content = match request.content {
            None | Some(serde_json::Value::Null) => return Err(CoreError::MissingParameters),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
                return Err(CoreError::MissingParameters);
            }
            Some(value) => value,
        };
        let target = non_empty(request.target_language).ok_or(CoreError::MissingParameters)?;
        let content_type = non_empty(request.content_type).ok_or(CoreError::MissingParameters)?;

        let target_language = Language::from_code(&target)
            .ok_or_else(|| CoreError::UnsupportedLanguage(target.clone()))?;
        let content_type = ContentType::parse(&content_type)
            .ok_or_else(|| CoreError::UnsupportedContentType(content_type.clone()))?;
        let source_language = match non_empty(request.source_language) {
            Some(code) => Some(Language::from_code(&code).ok_or_else(|| {
                CoreError::ValidationError(format!("Unsupported source language: {code}"))
            })?),
            None => None,
        };
        let content = TranslatableContent::from_json(content_type, content)
            .ok_or_else(|| CoreError::InvalidContent(content_type.to_string()))?;

        Ok(ValidatedTranslateRequest {
            content,
            target_language,
            source_language,
            recipe_id: non_empty(request.recipe_id),
        })
    }

    /// Translate one field group.
    ///
    /// Empty content and same-language requests are answered without a
    /// provider call. The result always has the source's shape: same variant,
    /// same length, ingredient amounts and units copied from the source.
    pub async fn translate_content(
        &self,
        content: &TranslatableContent,
        source: Language,
        target: Language,
    ) -> CoreResult<TranslatableContent> {
        if content.is_empty() || source == target {
            return Ok(content.clone());
        }

        let provider = self.ctx.provider();
        let request = TranslationRequest::new(content.clone(), source, target);
        let translated = provider.translate(&request).await?;

        conform(content, translated).ok_or_else(|| {
            CoreError::Provider(ProviderError::ParseError {
                provider: provider.id().to_string(),
                detail: format!(
                    "Translated {} does not match the source shape",
                    content.content_type()
                ),
            })
        })
    }

    /// Translate name, ingredients and instructions concurrently.
    ///
    /// All three must succeed; on any failure the other results are dropped
    /// and the first error (in field order) is returned.
    pub async fn translate_recipe(&self, recipe: &Recipe, target: Language) -> CoreResult<RecipeContent> {
        let source = recipe.original_language;
        let name = recipe.content(ContentType::Name);
        let ingredients = recipe.content(ContentType::Ingredients);
        let instructions = recipe.content(ContentType::Instructions);

        let results = join3(
            self.translate_content(&name, source, target),
            self.translate_content(&ingredients, source, target),
            self.translate_content(&instructions, source, target),
        )
        .await;

        match results {
            (
                Ok(TranslatableContent::Text(name)),
                Ok(TranslatableContent::Ingredients(ingredients)),
                Ok(TranslatableContent::Instructions(instructions)),
            ) => Ok(RecipeContent {
                name,
                ingredients,
                instructions,
            }),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                log::warn!(
                    "Translation of recipe {} into {target} failed, discarding all fields: {e}",
                    recipe.id
                );
                Err(e)
            }
            // translate_content guarantees the variant
            _ => Err(CoreError::Provider(ProviderError::ParseError {
                provider: self.ctx.provider().id().to_string(),
                detail: "Translated content has the wrong type".to_string(),
            })),
        }
    }

    /// `POST /translate`: validate, translate one field, merge it into the
    /// recipe's cache entry when asked to.
    ///
    /// The cache write is awaited and reported but never fails the request.
    pub async fn handle_translate_request(
        &self,
        request: TranslateFieldRequest,
    ) -> CoreResult<TranslateFieldResponse> {
        let request = Self::validate_request(request)?;

        let recipe = match &request.recipe_id {
            Some(id) => match self.ctx.recipe_repository().find_by_id(id).await {
                Ok(recipe) => recipe,
                Err(e) => {
                    log::warn!("Could not load recipe {id}, translating without it: {e}");
                    None
                }
            },
            None => None,
        };

        let source = request
            .source_language
            .or_else(|| recipe.as_ref().map(|r| r.original_language))
            .unwrap_or_else(|| request.target_language.other());

        let translated = self
            .translate_content(&request.content, source, request.target_language)
            .await?;

        // 同语言请求没有经过 provider，不能写入缓存
        let cache_status = if source == request.target_language {
            CacheWriteStatus::skipped("source and target language are the same")
        } else {
            self.persist_endpoint_result(&request, recipe.as_ref(), &translated)
                .await
        };

        Ok(TranslateFieldResponse {
            translated: translated.to_json(),
            cache_status,
        })
    }

    async fn persist_endpoint_result(
        &self,
        request: &ValidatedTranslateRequest,
        recipe: Option<&Recipe>,
        translated: &TranslatableContent,
    ) -> CacheWriteStatus {
        let Some(recipe_id) = &request.recipe_id else {
            return CacheWriteStatus::skipped("no recipeId");
        };
        let content_type = request.content.content_type();
        if !self.ctx.cache_policy().persists_from_endpoint(content_type) {
            return CacheWriteStatus::skipped(format!("{content_type} is not cached"));
        }
        let Some(recipe) = recipe else {
            return CacheWriteStatus::skipped("recipe not found");
        };
        if recipe.original_language == request.target_language {
            return CacheWriteStatus::skipped("target is the recipe's original language");
        }

        // 哈希取自请求内容：与食谱当前内容一致时才算新鲜
        let entry = TranslationCache::new(recipe_id.clone(), request.target_language)
            .with(translated.clone(), content_hash(&request.content));

        match TranslationCacheService::new(Arc::clone(&self.ctx))
            .merge(entry)
            .await
        {
            Ok(_) => CacheWriteStatus::Written,
            Err(e) => {
                log::warn!(
                    "Failed to cache {content_type} translation of recipe {recipe_id} ({}): {e}",
                    request.target_language
                );
                CacheWriteStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Force `translated` into the shape of `source`, or `None` if it cannot be.
fn conform(source: &TranslatableContent, translated: TranslatableContent) -> Option<TranslatableContent> {
    match (source, translated) {
        (TranslatableContent::Text(_), TranslatableContent::Text(text)) => {
            let text = text.trim().to_string();
            (!text.is_empty()).then_some(TranslatableContent::Text(text))
        }
        (TranslatableContent::Ingredients(originals), TranslatableContent::Ingredients(items))
            if originals.len() == items.len() =>
        {
            let items = originals
                .iter()
                .zip(items)
                .map(|(original, mut item)| {
                    item.amount = original.amount.clone();
                    item.unit = original.unit.clone();
                    item
                })
                .collect();
            Some(TranslatableContent::Ingredients(items))
        }
        (TranslatableContent::Instructions(originals), TranslatableContent::Instructions(steps))
            if originals.len() == steps.len() =>
        {
            Some(TranslatableContent::Instructions(steps))
        }
        _ => None,
    }
}
