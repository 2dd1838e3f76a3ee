//! `SeaORM` entities for `SqliteStore`.

pub mod recipe;
pub mod translation_cache;
