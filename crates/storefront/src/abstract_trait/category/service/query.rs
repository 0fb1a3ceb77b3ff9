use crate::domain::{requests::category::FindAllCategories, response::category::CategoryResponse};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCategoryQueryService = Arc<dyn CategoryQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllCategories,
    ) -> Result<Vec<CategoryResponse>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<CategoryResponse, ServiceError>;
}
