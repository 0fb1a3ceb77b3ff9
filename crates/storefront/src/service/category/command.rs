use crate::{
    abstract_trait::{
        category::{
            repository::{DynCategoryCommandRepository, DynCategoryQueryRepository},
            service::CategoryCommandServiceTrait,
        },
        product::repository::DynProductQueryRepository,
    },
    domain::{
        requests::category::{CreateCategoryRequest, UpdateCategoryRequest},
        response::category::CategoryResponse,
    },
    service::category::query::with_products,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use tracing::info;

const NOT_FOUND: &str = "Category not found";

#[derive(Clone)]
pub struct CategoryCommandService {
    query: DynCategoryQueryRepository,
    command: DynCategoryCommandRepository,
    product_query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl CategoryCommandService {
    pub fn new(
        query: DynCategoryQueryRepository,
        command: DynCategoryCommandRepository,
        product_query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("category_command_service", registry);

        Self {
            query,
            command,
            product_query,
            tracer: OperationTracer::new("category-command-service", metrics),
        }
    }
}

#[async_trait]
impl CategoryCommandServiceTrait for CategoryCommandService {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        info!("🏗️ Creating category: {}", req.name);

        let tracing_ctx = self.tracer.start_tracing(
            "category_create",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "create"),
                KeyValue::new("category.name", req.name.clone()),
            ],
        );

        let result = self
            .command
            .create_category(req)
            .await
            .map(|category| CategoryResponse::new(category, Vec::new()))
            .map_err(ServiceError::from);

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Category created");
        result
    }

    async fn update_category(
        &self,
        id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<CategoryResponse, ServiceError> {
        info!("🔄 Updating category ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "category_update",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "update"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let result = async {
            let mut category = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))?;

            if let Some(name) = &req.name {
                category.name = name.clone();
            }

            let updated = self
                .command
                .update_category(&category)
                .await
                .map_err(|err| ServiceError::from_repo(err, NOT_FOUND))?;

            let mut loaded = with_products(&self.product_query, vec![updated]).await?;
            loaded
                .pop()
                .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Put, &result, "Category updated");
        result
    }

    async fn delete_category(&self, id: i32) -> Result<(), ServiceError> {
        info!("🗑️ Deleting category ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "category_delete",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let result = self
            .command
            .delete_category(id)
            .await
            .map_err(|err| ServiceError::from_repo(err, NOT_FOUND));

        self.tracer
            .finish(&tracing_ctx, Method::Delete, &result, "Category deleted");
        result
    }
}
