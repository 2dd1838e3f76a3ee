//! 食谱展示会话
//!
//! A [`TranslationSession`] is one consumer's view of one recipe in one
//! active language. It owns the display state machine:
//!
//! ```text
//! Original --toggle--> Translating --ok--> Translated
//!    ^                      |                  |
//!    +-------- error -------+                  |
//!    +<------------- toggle (local) ---------->+
//! ```
//!
//! Only the first toggle talks to the provider; later toggles flip between
//! the held translation and the original.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, TranslationCacheService, TranslationService};
use crate::types::{
    CacheWriteStatus, ContentType, DisplayData, DisplayState, Language, Recipe, RecipeContent,
    SessionSnapshot, TranslationCache,
};
use crate::utils::content_hash::content_hash;

/// Background cache write started after a successful session translation.
///
/// Dropping the handle does not cancel the write.
#[derive(Debug)]
pub struct CacheWriteHandle {
    recipe_id: String,
    language: Language,
    task: JoinHandle<CoreResult<TranslationCache>>,
}

impl CacheWriteHandle {
    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Wait for the write and report how it went.
    pub async fn outcome(self) -> CacheWriteStatus {
        match self.task.await {
            Ok(Ok(_)) => CacheWriteStatus::Written,
            Ok(Err(e)) => CacheWriteStatus::Failed {
                message: e.to_string(),
            },
            Err(e) => CacheWriteStatus::Failed {
                message: format!("Cache write task aborted: {e}"),
            },
        }
    }
}

/// Result of [`TranslationSession::toggle`].
#[derive(Debug)]
pub enum ToggleOutcome {
    /// The recipe is already in the active language.
    NotNeeded,
    /// A translation request is running; nothing changed.
    InFlight,
    /// Switched back to the original.
    ShowingOriginal,
    /// Switched to the translation held by the session.
    ShowingTranslation,
    /// Translated through the provider. `cache_write` is `None` when the
    /// cache policy persists nothing for sessions.
    Translated {
        cache_write: Option<CacheWriteHandle>,
    },
}

/// 单个食谱在某一活动语言下的展示会话
pub struct TranslationSession {
    ctx: Arc<ServiceContext>,
    recipe: Recipe,
    language: Language,
    toggle_available: bool,
    translation: RwLock<Option<RecipeContent>>,
    state: watch::Sender<DisplayState>,
}

impl std::fmt::Debug for TranslationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationSession")
            .field("recipe_id", &self.recipe.id)
            .field("language", &self.language)
            .field("toggle_available", &self.toggle_available)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl TranslationSession {
    fn new(
        ctx: Arc<ServiceContext>,
        recipe: Recipe,
        language: Language,
        translation: Option<RecipeContent>,
    ) -> Self {
        let toggle_available = recipe.original_language != language;
        let initial = if translation.is_some() {
            DisplayState::Translated
        } else {
            DisplayState::Original
        };
        let (state, _) = watch::channel(initial);
        Self {
            ctx,
            recipe,
            language,
            toggle_available,
            translation: RwLock::new(translation),
            state,
        }
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe.id
    }

    /// The consumer's active language.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn toggle_available(&self) -> bool {
        self.toggle_available
    }

    pub fn state(&self) -> DisplayState {
        *self.state.borrow()
    }

    /// Receive every state change of this session.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.state.subscribe()
    }

    /// What to render right now.
    ///
    /// While `Translating` the original is shown.
    pub async fn display_data(&self) -> DisplayData {
        if self.state() == DisplayState::Translated
            && let Some(content) = self.translation.read().await.as_ref()
        {
            return DisplayData {
                language: self.language,
                is_translation: true,
                content: content.clone(),
            };
        }
        DisplayData {
            language: self.recipe.original_language,
            is_translation: false,
            content: self.recipe.original_content(),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            recipe_id: self.recipe.id.clone(),
            state: self.state(),
            toggle_available: self.toggle_available,
            data: self.display_data().await,
        }
    }

    /// Flip between original and translation, translating on first use.
    ///
    /// # Errors
    /// Provider failure on the first translation. The session is back in
    /// `Original` and nothing was cached.
    pub async fn toggle(&self) -> CoreResult<ToggleOutcome> {
        if !self.toggle_available {
            return Ok(ToggleOutcome::NotNeeded);
        }

        {
            let translation = self.translation.read().await;
            let mut outcome = None;
            // 状态判断与迁移在同一闭包内完成，并发 toggle 只有一个能进入 Translating
            self.state.send_if_modified(|state| match *state {
                DisplayState::Translating => {
                    outcome = Some(ToggleOutcome::InFlight);
                    false
                }
                DisplayState::Translated => {
                    *state = DisplayState::Original;
                    outcome = Some(ToggleOutcome::ShowingOriginal);
                    true
                }
                DisplayState::Original if translation.is_some() => {
                    *state = DisplayState::Translated;
                    outcome = Some(ToggleOutcome::ShowingTranslation);
                    true
                }
                DisplayState::Original => {
                    *state = DisplayState::Translating;
                    true
                }
            });
            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }

        let service = TranslationService::new(Arc::clone(&self.ctx));
        match service.translate_recipe(&self.recipe, self.language).await {
            Ok(content) => {
                let cache_write = self.spawn_cache_write(&content);
                *self.translation.write().await = Some(content);
                self.state.send_replace(DisplayState::Translated);
                Ok(ToggleOutcome::Translated { cache_write })
            }
            Err(e) => {
                self.state.send_replace(DisplayState::Original);
                Err(e)
            }
        }
    }

    fn spawn_cache_write(&self, content: &RecipeContent) -> Option<CacheWriteHandle> {
        let policy = self.ctx.cache_policy();
        let mut entry = TranslationCache::new(self.recipe.id.clone(), self.language);
        for content_type in ContentType::ALL {
            if policy.persists_in_session(content_type) {
                entry.set(
                    content.field(content_type),
                    content_hash(&self.recipe.content(content_type)),
                );
            }
        }
        if entry.is_empty() {
            return None;
        }

        let ctx = Arc::clone(&self.ctx);
        let (recipe_id, language) = (self.recipe.id.clone(), self.language);
        let task = tokio::spawn(async move {
            let result = TranslationCacheService::new(ctx).merge(entry).await;
            if let Err(e) = &result {
                log::warn!("Failed to cache translation of recipe {recipe_id} ({language}): {e}");
            }
            result
        });

        Some(CacheWriteHandle {
            recipe_id: self.recipe.id.clone(),
            language: self.language,
            task,
        })
    }
}

/// 创建展示会话
pub struct RecipeTranslationService {
    ctx: Arc<ServiceContext>,
}

impl RecipeTranslationService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Load the recipe and open a session for `language`.
    pub async fn open_session(
        &self,
        recipe_id: &str,
        language: Language,
    ) -> CoreResult<TranslationSession> {
        let recipe = self
            .ctx
            .recipe_repository()
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| CoreError::RecipeNotFound(recipe_id.to_string()))?;
        Ok(self.session_for(recipe, language).await)
    }

    /// Open a session for an already loaded recipe.
    ///
    /// A fresh cache entry starts the session in `Translated`. A cache read
    /// failure is logged and treated as a miss.
    pub async fn session_for(&self, recipe: Recipe, language: Language) -> TranslationSession {
        if recipe.original_language == language {
            return TranslationSession::new(Arc::clone(&self.ctx), recipe, language, None);
        }

        let cache = TranslationCacheService::new(Arc::clone(&self.ctx));
        let entry = match cache.lookup(&recipe.id, language).await {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!(
                    "Cache lookup for recipe {} ({language}) failed, treating as miss: {e}",
                    recipe.id
                );
                None
            }
        };
        let adopted = entry.and_then(|entry| cache.adopt(&recipe, &entry));
        if adopted.is_some() {
            log::debug!("Recipe {} opened from cached {language} translation", recipe.id);
        }

        TranslationSession::new(Arc::clone(&self.ctx), recipe, language, adopted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        MockTranslationProvider, create_test_context, create_test_context_with_policy,
        egg_recipe,
    };
    use crate::traits::{RecipeRepository, TranslationCacheStore};
    use crate::types::{CachePolicy, Ingredient};
    use recipe_translator_provider::ProviderError;
    use tokio::sync::Semaphore;

    fn network_error() -> ProviderError {
        ProviderError::NetworkError {
            provider: "mock".into(),
            detail: "connection reset".into(),
        }
    }

    async fn written(outcome: ToggleOutcome) -> CacheWriteStatus {
        match outcome {
            ToggleOutcome::Translated {
                cache_write: Some(handle),
            } => handle.outcome().await,
            other => panic!("expected a translation with a cache write, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn same_language_needs_no_translation() {
        let provider = MockTranslationProvider::new();
        let (ctx, repo, _) = create_test_context(provider.clone());
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();

        let session = RecipeTranslationService::new(ctx)
            .open_session(&recipe.id, Language::En)
            .await
            .unwrap();

        assert!(!session.toggle_available());
        assert!(matches!(session.toggle().await.unwrap(), ToggleOutcome::NotNeeded));
        assert_eq!(session.state(), DisplayState::Original);
        let data = session.display_data().await;
        assert!(!data.is_translation);
        assert_eq!(data.content.name, "Fried egg");
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_recipe_is_not_found() {
        let (ctx, _, _) = create_test_context(MockTranslationProvider::new());
        let err = RecipeTranslationService::new(ctx)
            .open_session("nope", Language::Es)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::RecipeNotFound(id) if id == "nope"));
    }

    #[tokio::test]
    async fn first_toggle_translates_then_toggles_locally() {
        let provider = MockTranslationProvider::new().with_dictionary(&[
            ("Fried egg", "Huevo frito"),
            ("egg", "huevo"),
            ("Fry the egg.", "Fríe el huevo."),
        ]);
        let (ctx, repo, cache) = create_test_context(provider.clone());
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        let session = RecipeTranslationService::new(ctx)
            .session_for(recipe.clone(), Language::Es)
            .await;
        assert_eq!(session.state(), DisplayState::Original);

        let outcome = session.toggle().await.unwrap();
        assert_eq!(written(outcome).await, CacheWriteStatus::Written);
        assert_eq!(provider.call_count(), 3);
        assert_eq!(session.state(), DisplayState::Translated);

        let data = session.display_data().await;
        assert!(data.is_translation);
        assert_eq!(data.language, Language::Es);
        assert_eq!(data.content.name, "Huevo frito");
        assert_eq!(data.content.ingredients, vec![Ingredient::new("huevo", 2_u32, "u")]);
        assert_eq!(data.content.instructions, vec!["Fríe el huevo.".to_string()]);

        assert!(matches!(session.toggle().await.unwrap(), ToggleOutcome::ShowingOriginal));
        assert_eq!(session.display_data().await.content.name, "Fried egg");
        assert!(matches!(
            session.toggle().await.unwrap(),
            ToggleOutcome::ShowingTranslation
        ));
        assert_eq!(provider.call_count(), 3);

        // name stays session-only under the default policy
        let entry = cache.find(&recipe.id, Language::Es).await.unwrap().unwrap();
        assert!(entry.name.is_none());
        assert_eq!(entry.ingredients.unwrap().value[0].name, "huevo");
    }

    #[tokio::test]
    async fn cached_translation_is_reused_without_provider_calls() {
        let provider = MockTranslationProvider::new().with_dictionary(&[("egg", "huevo")]);
        let (ctx, repo, _) = create_test_context(provider.clone());
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        let service = RecipeTranslationService::new(ctx);

        let first = service.open_session(&recipe.id, Language::Es).await.unwrap();
        written(first.toggle().await.unwrap()).await;
        assert_eq!(provider.call_count(), 3);

        let second = service.open_session(&recipe.id, Language::Es).await.unwrap();
        assert_eq!(second.state(), DisplayState::Translated);
        let data = second.display_data().await;
        assert!(data.is_translation);
        // name was not cached, so the original is shown
        assert_eq!(data.content.name, "Fried egg");
        assert_eq!(data.content.ingredients[0].name, "huevo");
        assert_eq!(provider.call_count(), 3);

        assert!(matches!(second.toggle().await.unwrap(), ToggleOutcome::ShowingOriginal));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn policy_with_names_restores_translated_name() {
        let provider = MockTranslationProvider::new()
            .with_dictionary(&[("Fried egg", "Huevo frito"), ("egg", "huevo")]);
        let policy = CachePolicy {
            session_fields: ContentType::ALL.to_vec(),
            ..CachePolicy::default()
        };
        let (ctx, repo, _) = create_test_context_with_policy(provider.clone(), policy);
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        let service = RecipeTranslationService::new(ctx);

        let first = service.open_session(&recipe.id, Language::Es).await.unwrap();
        written(first.toggle().await.unwrap()).await;

        let second = service.open_session(&recipe.id, Language::Es).await.unwrap();
        assert_eq!(second.display_data().await.content.name, "Huevo frito");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn edited_recipe_is_translated_again() {
        let provider = MockTranslationProvider::new();
        let (ctx, repo, _) = create_test_context(provider.clone());
        let mut recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        let service = RecipeTranslationService::new(ctx);

        let first = service.open_session(&recipe.id, Language::Es).await.unwrap();
        written(first.toggle().await.unwrap()).await;

        recipe.ingredients.push(Ingredient::new("salt", "1 pinch", ""));
        repo.save(&recipe).await.unwrap();

        let second = service.open_session(&recipe.id, Language::Es).await.unwrap();
        assert_eq!(second.state(), DisplayState::Original);
        written(second.toggle().await.unwrap()).await;
        assert_eq!(provider.call_count(), 6);
        assert_eq!(second.display_data().await.content.ingredients.len(), 2);
    }

    #[tokio::test]
    async fn any_field_failure_discards_everything() {
        let provider = MockTranslationProvider::new();
        provider.fail_on(ContentType::Instructions, network_error()).await;
        let (ctx, repo, cache) = create_test_context(provider.clone());
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        let session = RecipeTranslationService::new(ctx)
            .session_for(recipe.clone(), Language::Es)
            .await;

        let err = session.toggle().await.unwrap_err();
        assert!(matches!(err, CoreError::Provider(ProviderError::NetworkError { .. })));
        assert_eq!(session.state(), DisplayState::Original);
        assert!(!session.display_data().await.is_translation);
        assert!(cache.find_by_recipe(&recipe.id).await.unwrap().is_empty());

        // a later toggle retries
        provider.clear_failures().await;
        written(session.toggle().await.unwrap()).await;
        assert_eq!(session.state(), DisplayState::Translated);
        assert_eq!(provider.call_count(), 6);
    }

    #[tokio::test]
    async fn cache_write_failure_keeps_translation() {
        let (ctx, repo, cache) = create_test_context(MockTranslationProvider::new());
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        cache.set_save_error(Some("database is locked".to_string())).await;
        let session = RecipeTranslationService::new(ctx)
            .session_for(recipe, Language::Es)
            .await;

        let status = written(session.toggle().await.unwrap()).await;
        assert!(matches!(status, CacheWriteStatus::Failed { message } if message.contains("locked")));
        assert_eq!(session.state(), DisplayState::Translated);
        assert!(session.display_data().await.is_translation);
    }

    #[tokio::test]
    async fn empty_session_policy_spawns_no_write() {
        let policy = CachePolicy {
            session_fields: Vec::new(),
            ..CachePolicy::default()
        };
        let (ctx, repo, cache) =
            create_test_context_with_policy(MockTranslationProvider::new(), policy);
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        let session = RecipeTranslationService::new(ctx)
            .session_for(recipe.clone(), Language::Es)
            .await;

        let outcome = session.toggle().await.unwrap();
        assert!(matches!(outcome, ToggleOutcome::Translated { cache_write: None }));
        assert!(cache.find_by_recipe(&recipe.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn shape_is_preserved() {
        let (ctx, _, _) = create_test_context(MockTranslationProvider::new());
        let mut recipe = egg_recipe(Language::En);
        recipe.ingredients = vec![
            Ingredient::new("flour", "1/2", "cup"),
            Ingredient::new("milk", 250_u32, "ml"),
            Ingredient::new("salt", "a pinch", ""),
        ];
        recipe.instructions = vec!["Mix.".into(), "Rest.".into(), "Bake.".into(), "Serve.".into()];
        let session = RecipeTranslationService::new(ctx)
            .session_for(recipe.clone(), Language::Es)
            .await;

        session.toggle().await.unwrap();
        let data = session.display_data().await;
        assert_eq!(data.content.ingredients.len(), 3);
        assert_eq!(data.content.instructions.len(), 4);
        for (translated, original) in data.content.ingredients.iter().zip(&recipe.ingredients) {
            assert_eq!(translated.amount, original.amount);
            assert_eq!(translated.unit, original.unit);
        }
    }

    #[tokio::test]
    async fn toggle_during_translation_is_ignored() {
        let gate = Arc::new(Semaphore::new(0));
        let provider = MockTranslationProvider::new().gated(Arc::clone(&gate));
        let (ctx, _, _) = create_test_context(provider.clone());
        let session = Arc::new(
            RecipeTranslationService::new(ctx)
                .session_for(egg_recipe(Language::En), Language::Es)
                .await,
        );
        let mut states = session.subscribe();

        let running = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.toggle().await }
        });
        states
            .wait_for(|s| *s == DisplayState::Translating)
            .await
            .unwrap();

        assert!(matches!(session.toggle().await.unwrap(), ToggleOutcome::InFlight));
        assert!(!session.display_data().await.is_translation);

        gate.add_permits(3);
        let outcome = running.await.unwrap().unwrap();
        assert!(matches!(outcome, ToggleOutcome::Translated { .. }));
        assert_eq!(*states.borrow_and_update(), DisplayState::Translated);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn broken_cache_read_is_a_miss() {
        let (ctx, repo, cache) = create_test_context(MockTranslationProvider::new());
        let recipe = egg_recipe(Language::En);
        repo.save(&recipe).await.unwrap();
        cache.set_find_error(Some("corrupt row".to_string())).await;

        let session = RecipeTranslationService::new(ctx)
            .open_session(&recipe.id, Language::Es)
            .await
            .unwrap();
        assert_eq!(session.state(), DisplayState::Original);
        assert!(session.toggle_available());
    }

    #[tokio::test]
    async fn snapshot_reflects_state() {
        let (ctx, _, _) = create_test_context(MockTranslationProvider::new());
        let session = RecipeTranslationService::new(ctx)
            .session_for(egg_recipe(Language::Es), Language::En)
            .await;

        let before = session.snapshot().await;
        assert_eq!(before.state, DisplayState::Original);
        assert!(before.toggle_available);
        assert_eq!(before.data.language, Language::Es);

        session.toggle().await.unwrap();
        let after = session.snapshot().await;
        assert_eq!(after.state, DisplayState::Translated);
        assert_eq!(after.data.language, Language::En);
        assert!(after.data.is_translation);
    }
}
