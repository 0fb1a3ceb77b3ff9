use crate::{filter::CategoryFilters, model::category::Category as CategoryModel};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynCategoryQueryRepository = Arc<dyn CategoryQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryRepositoryTrait {
    async fn find_all(
        &self,
        filters: &CategoryFilters,
    ) -> Result<Vec<CategoryModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<CategoryModel>, RepositoryError>;
}
