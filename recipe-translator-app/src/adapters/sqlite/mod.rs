//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `RecipeRepository` and
//! `TranslationCacheStore`, backed by a local `SQLite` database. List fields
//! and cached translations are stored as JSON text.

pub(crate) mod entity;
mod migration;
mod recipe_repo;
mod translation_cache_store;

use std::path::Path;

use recipe_translator_core::error::{CoreError, CoreResult};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based unified store.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and run migrations.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
        Self::connect(&db_url).await
    }

    /// Connect to a `SeaORM` database URL, e.g. `sqlite::memory:`.
    pub async fn connect(db_url: &str) -> CoreResult<Self> {
        let db = Database::connect(db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        // Ensure schema is up to date before the store is used.
        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::debug!("SQLite store ready at {db_url}");
        Ok(Self { db })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> CoreResult<String> {
    serde_json::to_string(value).map_err(|e| CoreError::SerializationError(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(column: &str, text: &str) -> CoreResult<T> {
    serde_json::from_str(text)
        .map_err(|e| CoreError::SerializationError(format!("Invalid {column}: {e}")))
}
