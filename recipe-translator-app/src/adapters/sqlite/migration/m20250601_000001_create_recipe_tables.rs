use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // recipes 表
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Recipe::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Recipe::Name).string().not_null())
                    .col(
                        ColumnDef::new(Recipe::RecipeType)
                            .string()
                            .not_null()
                            .default("cooking"),
                    )
                    .col(ColumnDef::new(Recipe::OriginalLanguage).string().not_null())
                    .col(
                        ColumnDef::new(Recipe::Ingredients)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(Recipe::Instructions)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Recipe::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Recipe::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // translation_cache 表（与 recipes 分离，删除食谱时由服务层清理）
        manager
            .create_table(
                Table::create()
                    .table(TranslationCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TranslationCache::RecipeId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TranslationCache::Language)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TranslationCache::Name).text().null())
                    .col(ColumnDef::new(TranslationCache::Ingredients).text().null())
                    .col(ColumnDef::new(TranslationCache::Instructions).text().null())
                    .col(
                        ColumnDef::new(TranslationCache::TranslatedAt)
                            .string()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TranslationCache::RecipeId)
                            .col(TranslationCache::Language),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TranslationCache::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recipe::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Recipe {
    #[sea_orm(iden = "recipes")]
    Table,
    Id,
    Name,
    RecipeType,
    OriginalLanguage,
    Ingredients,
    Instructions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TranslationCache {
    #[sea_orm(iden = "translation_cache")]
    Table,
    RecipeId,
    Language,
    Name,
    Ingredients,
    Instructions,
    TranslatedAt,
}
