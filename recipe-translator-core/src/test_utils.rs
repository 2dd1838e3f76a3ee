//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use recipe_translator_provider::{
    ProviderError, ProviderMetadata, ProviderType, TranslationProvider,
};
use tokio::sync::{RwLock, Semaphore};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{RecipeRepository, TranslationCacheStore};
use crate::types::{
    CachePolicy, ContentType, CreateRecipeRequest, Ingredient, Language, Recipe, RecipeType,
    TranslatableContent, TranslationCache, TranslationRequest,
};

// ===== MockRecipeRepository =====

pub struct MockRecipeRepository {
    recipes: RwLock<HashMap<String, Recipe>>,
}

impl MockRecipeRepository {
    pub fn new() -> Self {
        Self {
            recipes: RwLock::new(HashMap::new()),
        }
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.recipes.read().await.contains_key(id)
    }
}

#[async_trait]
impl RecipeRepository for MockRecipeRepository {
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

// ===== MockTranslationCacheStore =====

pub struct MockTranslationCacheStore {
    entries: RwLock<HashMap<(String, Language), TranslationCache>>,
    /// 如果 Some，save 时返回此错误（用于测试缓存写入失败路径）
    save_error: RwLock<Option<String>>,
    /// 如果 Some，find 时返回此错误
    find_error: RwLock<Option<String>>,
    /// find 读取前先让出一次调度，让并发写入交错
    yield_on_find: AtomicBool,
}

impl MockTranslationCacheStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            save_error: RwLock::new(None),
            find_error: RwLock::new(None),
            yield_on_find: AtomicBool::new(false),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }

    pub async fn set_find_error(&self, err: Option<String>) {
        *self.find_error.write().await = err;
    }

    pub fn set_yield_on_find(&self, enabled: bool) {
        self.yield_on_find.store(enabled, Ordering::SeqCst);
    }
}

#[async_trait]
impl TranslationCacheStore for MockTranslationCacheStore {
    async fn find(
        &self,
        recipe_id: &str,
        language: Language,
    ) -> CoreResult<Option<TranslationCache>> {
        if self.yield_on_find.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        if let Some(ref msg) = *self.find_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        Ok(self
            .entries
            .read()
            .await
            .get(&(recipe_id.to_string(), language))
            .cloned())
    }

    async fn find_by_recipe(&self, recipe_id: &str) -> CoreResult<Vec<TranslationCache>> {
        let mut entries: Vec<TranslationCache> = self
            .entries
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
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.entries
            .write()
            .await
            .insert((entry.recipe_id.clone(), entry.language), entry.clone());
        Ok(())
    }

    async fn delete(&self, recipe_id: &str, language: Language) -> CoreResult<bool> {
        Ok(self
            .entries
            .write()
            .await
            .remove(&(recipe_id.to_string(), language))
            .is_some())
    }

    async fn delete_by_recipe(&self, recipe_id: &str) -> CoreResult<()> {
        self.entries
            .write()
            .await
            .retain(|(id, _), _| id != recipe_id);
        Ok(())
    }
}

// ===== MockTranslationProvider =====

/// Dictionary-backed provider. Unknown strings become `"[es] text"`.
/// Ingredient amounts and units pass through unchanged.
#[derive(Clone, Default)]
pub struct MockTranslationProvider {
    dictionary: Arc<HashMap<String, String>>,
    gate: Option<Arc<Semaphore>>,
    calls: Arc<AtomicUsize>,
    requests: Arc<RwLock<Vec<TranslationRequest>>>,
    failures: Arc<RwLock<HashMap<ContentType, ProviderError>>>,
}

impl MockTranslationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dictionary(mut self, pairs: &[(&str, &str)]) -> Self {
        self.dictionary = Arc::new(
            pairs
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        );
        self
    }

    /// Every call waits for a permit of `gate` before answering.
    #[must_use]
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub async fn fail_on(&self, content_type: ContentType, error: ProviderError) {
        self.failures.write().await.insert(content_type, error);
    }

    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// Number of `translate` calls so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn requests(&self) -> Vec<TranslationRequest> {
        self.requests.read().await.clone()
    }

    fn word(&self, text: &str, target: Language) -> String {
        self.dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[{target}] {text}"))
    }
}

#[async_trait]
impl TranslationProvider for MockTranslationProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn metadata() -> ProviderMetadata {
        ProviderMetadata {
            id: ProviderType::Openai,
            name: "Mock".to_string(),
            description: "In-memory test provider".to_string(),
            default_model: "mock-1".to_string(),
            required_fields: Vec::new(),
        }
    }

    fn model(&self) -> &str {
        "mock-1"
    }

    async fn validate_credentials(&self) -> recipe_translator_provider::Result<bool> {
        Ok(true)
    }

    async fn translate(
        &self,
        req: &TranslationRequest,
    ) -> recipe_translator_provider::Result<TranslatableContent> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.write().await.push(req.clone());

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.map_err(|e| ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: e.to_string(),
            })?;
        }
        if let Some(error) = self.failures.read().await.get(&req.content_type) {
            return Err(error.clone());
        }

        let target = req.target_language;
        Ok(match &req.content {
            TranslatableContent::Text(text) => TranslatableContent::Text(self.word(text, target)),
            TranslatableContent::Ingredients(items) => TranslatableContent::Ingredients(
                items
                    .iter()
                    .map(|item| Ingredient {
                        name: self.word(&item.name, target),
                        ..item.clone()
                    })
                    .collect(),
            ),
            TranslatableContent::Instructions(steps) => TranslatableContent::Instructions(
                steps.iter().map(|step| self.word(step, target)).collect(),
            ),
        })
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`（默认缓存策略）
pub fn create_test_context(
    provider: MockTranslationProvider,
) -> (
    Arc<ServiceContext>,
    Arc<MockRecipeRepository>,
    Arc<MockTranslationCacheStore>,
) {
    create_test_context_with_policy(provider, CachePolicy::default())
}

pub fn create_test_context_with_policy(
    provider: MockTranslationProvider,
    policy: CachePolicy,
) -> (
    Arc<ServiceContext>,
    Arc<MockRecipeRepository>,
    Arc<MockTranslationCacheStore>,
) {
    let repo = Arc::new(MockRecipeRepository::new());
    let cache = Arc::new(MockTranslationCacheStore::new());
    let ctx = Arc::new(ServiceContext::new(
        repo.clone(),
        cache.clone(),
        Arc::new(provider),
        policy,
    ));
    (ctx, repo, cache)
}

/// "Fried egg"：一个配料、一个步骤
pub fn egg_recipe(original_language: Language) -> Recipe {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    Recipe {
        id: "recipe-egg".to_string(),
        name: "Fried egg".to_string(),
        recipe_type: RecipeType::Cooking,
        original_language,
        ingredients: vec![Ingredient::new("egg", 2_u32, "u")],
        instructions: vec!["Fry the egg.".to_string()],
        created_at: created,
        updated_at: created,
    }
}

pub fn egg_recipe_request(original_language: Language) -> CreateRecipeRequest {
    CreateRecipeRequest {
        name: "Fried egg".to_string(),
        recipe_type: RecipeType::Cooking,
        original_language,
        ingredients: vec![Ingredient::new("egg", 2_u32, "u")],
        instructions: vec!["Fry the egg.".to_string()],
    }
}
