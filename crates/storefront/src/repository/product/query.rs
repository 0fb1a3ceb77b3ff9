use crate::{
    abstract_trait::product::repository::ProductQueryRepositoryTrait, filter::ProductFilters,
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, QueryBuilder};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching products with filters: {:?}", filters);

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT p.id, p.name, p.price, p.category_id FROM products p WHERE 1=1",
        );
        filters.apply(&mut builder);
        builder.push(" ORDER BY p.id");

        let products = builder
            .build_query_as::<ProductModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        info!("✅ Found {} products", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        info!("🆔 Fetching product by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            "SELECT id, name, price, category_id FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch product {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(product)
    }

    async fn find_by_category_ids(
        &self,
        category_ids: &[i32],
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let products = sqlx::query_as::<_, ProductModel>(
            r#"
            SELECT id, name, price, category_id
            FROM products
            WHERE category_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(category_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch products of categories {:?}: {:?}", category_ids, e);
            RepositoryError::from(e)
        })?;

        Ok(products)
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to check products {:?}: {:?}", ids, e);
                RepositoryError::from(e)
            })?;

        Ok(existing)
    }
}
