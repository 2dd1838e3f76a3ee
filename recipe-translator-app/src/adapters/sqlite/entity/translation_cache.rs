//! `SeaORM` entity for the `translation_cache` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "translation_cache")]
/// One cached translation, keyed by `(recipe_id, language)`.
///
/// Field columns hold a JSON `CachedField` or NULL.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub recipe_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub language: String,
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub translated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
