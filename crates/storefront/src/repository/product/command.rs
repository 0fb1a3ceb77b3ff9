use crate::{
    abstract_trait::product::repository::ProductCommandRepositoryTrait,
    domain::requests::product::CreateProductRequest, model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, price, category_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, category_id
            "#,
        )
        .bind(&req.name)
        .bind(req.price)
        .bind(req.category_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product '{}': {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {} ({})", product.id, product.name);
        Ok(product)
    }

    async fn update_product(
        &self,
        product: &ProductModel,
    ) -> Result<ProductModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let updated = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name        = $2,
                price       = $3,
                category_id = $4
            WHERE id = $1
            RETURNING id, name, price, category_id
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.category_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product ID {}: {:?}", product.id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated product ID {}", updated.id);
        Ok(updated)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting product: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
