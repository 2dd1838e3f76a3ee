//! Platform-agnostic application bootstrap for Recipe Translator.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! and provider injection).

pub mod adapters;

use std::sync::Arc;

use recipe_translator_core::error::{CoreError, CoreResult};
use recipe_translator_core::services::{
    ProviderMetadataService, RecipeService, RecipeTranslationService, ServiceContext,
    TranslationCacheService, TranslationService,
};
use recipe_translator_core::traits::{RecipeRepository, TranslationCacheStore};
use recipe_translator_core::types::{CachePolicy, ProviderCredentials};
use recipe_translator_provider::{TranslationProvider, create_provider};

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds storage adapters and the provider)
    pub ctx: Arc<ServiceContext>,
    /// Recipe CRUD
    pub recipe_service: RecipeService,
    /// `POST /translate`
    pub translation_service: TranslationService,
    /// Cache inspection and invalidation
    pub cache_service: TranslationCacheService,
    /// Display sessions
    pub session_service: RecipeTranslationService,
    /// Provider metadata service
    pub provider_metadata_service: ProviderMetadataService,
}

impl AppState {
    /// Check the provider's credentials once at startup.
    ///
    /// Never fails startup: an unreachable or rejecting provider is logged
    /// and `false` is returned.
    pub async fn verify_provider(&self) -> bool {
        let provider = self.ctx.provider();
        match provider.validate_credentials().await {
            Ok(true) => {
                log::info!(
                    "Translation provider {} ready (model {})",
                    provider.id(),
                    provider.model()
                );
                true
            }
            Ok(false) => {
                log::warn!("Translation provider {} rejected the API key", provider.id());
                false
            }
            Err(e) => {
                log::warn!("Could not verify translation provider {}: {e}", provider.id());
                false
            }
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required
/// - `recipe_repository` and `cache_store` (or `store` for one type serving both)
/// - `provider`, or `provider_credentials` to build one
///
/// # Optional
/// - `cache_policy`: defaults to `CachePolicy::default()`
pub struct AppStateBuilder {
    recipe_repository: Option<Arc<dyn RecipeRepository>>,
    cache_store: Option<Arc<dyn TranslationCacheStore>>,
    provider: Option<Arc<dyn TranslationProvider>>,
    provider_credentials: Option<ProviderCredentials>,
    cache_policy: CachePolicy,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            recipe_repository: None,
            cache_store: None,
            provider: None,
            provider_credentials: None,
            cache_policy: CachePolicy::default(),
        }
    }

    #[must_use]
    pub fn recipe_repository(mut self, repo: Arc<dyn RecipeRepository>) -> Self {
        self.recipe_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn cache_store(mut self, store: Arc<dyn TranslationCacheStore>) -> Self {
        self.cache_store = Some(store);
        self
    }

    /// Use one store for both recipes and the translation cache.
    #[must_use]
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: RecipeRepository + TranslationCacheStore + 'static,
    {
        let recipes: Arc<dyn RecipeRepository> = store.clone();
        let cache: Arc<dyn TranslationCacheStore> = store;
        self.recipe_repository(recipes).cache_store(cache)
    }

    /// Inject a ready provider. Takes precedence over `provider_credentials`.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn TranslationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn provider_credentials(mut self, credentials: ProviderCredentials) -> Self {
        self.provider_credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing,
    /// or `CoreError::Provider` if the provider cannot be created.
    pub fn build(self) -> CoreResult<AppState> {
        let recipe_repository = self.recipe_repository.ok_or_else(|| {
            CoreError::ValidationError("recipe_repository is required".to_string())
        })?;
        let cache_store = self
            .cache_store
            .ok_or_else(|| CoreError::ValidationError("cache_store is required".to_string()))?;
        let provider = match (self.provider, self.provider_credentials) {
            (Some(provider), _) => provider,
            (None, Some(credentials)) => create_provider(credentials)?,
            (None, None) => {
                return Err(CoreError::ValidationError(
                    "provider or provider_credentials is required".to_string(),
                ));
            }
        };

        log::info!(
            "Cache policy: session={:?} endpoint={:?} check_freshness={}",
            self.cache_policy.session_fields,
            self.cache_policy.endpoint_fields,
            self.cache_policy.check_freshness
        );

        let ctx = Arc::new(ServiceContext::new(
            recipe_repository,
            cache_store,
            provider,
            self.cache_policy,
        ));

        Ok(AppState {
            recipe_service: RecipeService::new(Arc::clone(&ctx)),
            translation_service: TranslationService::new(Arc::clone(&ctx)),
            cache_service: TranslationCacheService::new(Arc::clone(&ctx)),
            session_service: RecipeTranslationService::new(Arc::clone(&ctx)),
            provider_metadata_service: ProviderMetadataService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
