use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::CatalogRow;
use crate::catalog::repo;

/// Destination for imported rows. Each call inserts one row on its own; there
/// is no surrounding transaction.
#[async_trait]
pub trait CatalogSink: Send + Sync {
    async fn insert(&self, row: &CatalogRow) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgCatalogSink {
    db: PgPool,
}

impl PgCatalogSink {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogSink for PgCatalogSink {
    async fn insert(&self, row: &CatalogRow) -> anyhow::Result<()> {
        match row {
            CatalogRow::Ingredient(r) => repo::insert_ingredient(&self.db, r).await?,
            CatalogRow::Recipe(r) => repo::insert_recipe(&self.db, r).await?,
            CatalogRow::RecipeIngredient(r) => repo::insert_recipe_ingredient(&self.db, r).await?,
        };
        Ok(())
    }
}
