//! 业务逻辑服务层

mod provider_metadata_service;
mod recipe_service;
mod translation_cache_service;
mod translation_service;
mod translation_session;

pub use provider_metadata_service::{ActiveProvider, ProviderMetadataService};
pub use recipe_service::RecipeService;
pub use translation_cache_service::TranslationCacheService;
pub use translation_service::{TranslationService, ValidatedTranslateRequest};
pub use translation_session::{
    CacheWriteHandle, RecipeTranslationService, ToggleOutcome, TranslationSession,
};

use std::collections::HashMap;
use std::sync::Arc;

use recipe_translator_provider::TranslationProvider;
use tokio::sync::Mutex;

use crate::traits::{RecipeRepository, TranslationCacheStore};
use crate::types::{CachePolicy, Language};

type EntryLocks = Mutex<HashMap<(String, Language), Arc<Mutex<()>>>>;

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现和翻译 Provider。
pub struct ServiceContext {
    recipe_repository: Arc<dyn RecipeRepository>,
    cache_store: Arc<dyn TranslationCacheStore>,
    provider: Arc<dyn TranslationProvider>,
    cache_policy: CachePolicy,
    /// 每个 `(recipe_id, language)` 一把锁，串行化缓存条目的读-改-写
    entry_locks: EntryLocks,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        recipe_repository: Arc<dyn RecipeRepository>,
        cache_store: Arc<dyn TranslationCacheStore>,
        provider: Arc<dyn TranslationProvider>,
        cache_policy: CachePolicy,
    ) -> Self {
        Self {
            recipe_repository,
            cache_store,
            provider,
            cache_policy,
            entry_locks: Mutex::new(HashMap::new()),
        }
    }

    /// 食谱仓库
    pub fn recipe_repository(&self) -> &Arc<dyn RecipeRepository> {
        &self.recipe_repository
    }

    /// 翻译缓存存储
    pub fn cache_store(&self) -> &Arc<dyn TranslationCacheStore> {
        &self.cache_store
    }

    /// 翻译 Provider
    pub fn provider(&self) -> &Arc<dyn TranslationProvider> {
        &self.provider
    }

    /// 缓存策略
    pub fn cache_policy(&self) -> &CachePolicy {
        &self.cache_policy
    }

    /// Lock guarding one cache entry's read-modify-write.
    ///
    /// Only serializes writers inside this process.
    pub async fn cache_entry_lock(&self, recipe_id: &str, language: Language) -> Arc<Mutex<()>> {
        let mut locks = self.entry_locks.lock().await;
        // 清理无人持有的锁
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(
            locks
                .entry((recipe_id.to_string(), language))
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}
