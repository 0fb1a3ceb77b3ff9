use crate::{
    abstract_trait::category::repository::CategoryQueryRepositoryTrait, filter::CategoryFilters,
    model::category::Category as CategoryModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryQueryRepository {
    db: ConnectionPool,
}

impl CategoryQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for CategoryQueryRepository {
    async fn find_all(
        &self,
        filters: &CategoryFilters,
    ) -> Result<Vec<CategoryModel>, RepositoryError> {
        info!("🔍 Fetching categories with filters: {:?}", filters);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT c.id, c.name FROM categories c WHERE 1=1");
        filters.apply(&mut builder);
        builder.push(" ORDER BY c.id");

        let categories = builder
            .build_query_as::<CategoryModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch categories: {:?}", e);
                RepositoryError::from(e)
            })?;

        info!("✅ Found {} categories", categories.len());
        Ok(categories)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError> {
        info!("🆔 Fetching category by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let category = sqlx::query_as::<_, CategoryModel>(
            "SELECT id, name FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch category {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(category)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<CategoryModel>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let categories = sqlx::query_as::<_, CategoryModel>(
            "SELECT id, name FROM categories WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories {:?}: {:?}", ids, e);
            RepositoryError::from(e)
        })?;

        Ok(categories)
    }
}
