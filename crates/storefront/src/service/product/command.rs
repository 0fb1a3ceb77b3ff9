use crate::{
    abstract_trait::{
        category::repository::DynCategoryQueryRepository,
        product::{
            repository::{DynProductCommandRepository, DynProductQueryRepository},
            service::ProductCommandServiceTrait,
        },
    },
    domain::{
        requests::product::{CreateProductRequest, UpdateProductRequest},
        response::product::ProductResponse,
    },
    model::product::Product as ProductModel,
    service::product::query::with_categories,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use tracing::info;

const NOT_FOUND: &str = "Product not found";

#[derive(Clone)]
pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    category_query: DynCategoryQueryRepository,
    tracer: OperationTracer,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        category_query: DynCategoryQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("product_command_service", registry);

        Self {
            query,
            command,
            category_query,
            tracer: OperationTracer::new("product-command-service", metrics),
        }
    }

    async fn respond(&self, product: ProductModel) -> Result<ProductResponse, ServiceError> {
        let mut loaded = with_categories(&self.category_query, vec![product]).await?;
        loaded
            .pop()
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🏗️ Creating product: {} ({})", req.name, req.price);

        let tracing_ctx = self.tracer.start_tracing(
            "product_create",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        let result = match self.command.create_product(req).await {
            Ok(product) => self.respond(product).await,
            Err(err) => Err(ServiceError::from(err)),
        };

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Product created");
        result
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        info!("🔄 Updating product ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "product_update",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = async {
            let mut product = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))?;

            if let Some(name) = &req.name {
                product.name = name.clone();
            }
            if let Some(price) = req.price {
                product.price = price;
            }
            if let Some(category_id) = req.category_id {
                product.category_id = category_id;
            }

            let updated = self
                .command
                .update_product(&product)
                .await
                .map_err(|err| ServiceError::from_repo(err, NOT_FOUND))?;

            self.respond(updated).await
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Put, &result, "Product updated");
        result
    }

    async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        info!("🗑️ Deleting product ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "product_delete",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = self
            .command
            .delete_product(id)
            .await
            .map_err(|err| ServiceError::from_repo(err, NOT_FOUND));

        self.tracer
            .finish(&tracing_ctx, Method::Delete, &result, "Product deleted");
        result
    }
}
