//! Recipe Translator HTTP API
//!
//! Routes live in [`handlers`]; the binary in `main.rs` wires config,
//! logging and storage around them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;

use std::sync::Arc;

use anyhow::Context;
use recipe_translator_app::adapters::{InMemoryStore, SqliteStore};
use recipe_translator_app::{AppState, AppStateBuilder};

use crate::config::Config;

/// Build the application state described by `config`.
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let builder = AppStateBuilder::new()
        .provider_credentials(config.provider.credentials()?)
        .cache_policy(config.cache.clone());

    let builder = if config.database.in_memory {
        tracing::warn!("Using in-memory storage; recipes are lost on restart");
        builder.store(Arc::new(InMemoryStore::new()))
    } else {
        let store = SqliteStore::new(&config.database.path)
            .await
            .with_context(|| format!("Failed to open {}", config.database.path.display()))?;
        tracing::info!("Using SQLite database {}", config.database.path.display());
        builder.store(Arc::new(store))
    };

    Ok(builder.build()?)
}
