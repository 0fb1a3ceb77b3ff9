use crate::{
    abstract_trait::category::repository::CategoryCommandRepositoryTrait,
    domain::requests::category::CreateCategoryRequest, model::category::Category as CategoryModel,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryCommandRepository {
    db: ConnectionPool,
}

impl CategoryCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for CategoryCommandRepository {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let category = sqlx::query_as::<_, CategoryModel>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&req.name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to create category '{}': {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created category ID {} ({})", category.id, category.name);
        Ok(category)
    }

    async fn update_category(
        &self,
        category: &CategoryModel,
    ) -> Result<CategoryModel, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let updated = sqlx::query_as::<_, CategoryModel>(
            r#"
            UPDATE categories
            SET name = $2
            WHERE id = $1
            RETURNING id, name
            "#,
        )
        .bind(category.id)
        .bind(&category.name)
        .fetch_one(&mut *conn)
        .await
        .map_err(|err| {
            error!("❌ Failed to update category ID {}: {:?}", category.id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated category ID {}", updated.id);
        Ok(updated)
    }

    async fn delete_category(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting category: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete category {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
