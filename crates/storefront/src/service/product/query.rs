use crate::{
    abstract_trait::{
        category::repository::DynCategoryQueryRepository,
        product::{repository::DynProductQueryRepository, service::ProductQueryServiceTrait},
    },
    domain::{requests::product::FindAllProducts, response::product::ProductResponse},
    filter::ProductFilters,
    model::{category::Category as CategoryModel, product::Product as ProductModel},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use std::collections::HashMap;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    category_query: DynCategoryQueryRepository,
    tracer: OperationTracer,
}

impl ProductQueryService {
    pub fn new(
        query: DynProductQueryRepository,
        category_query: DynCategoryQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("product_query_service", registry);

        Self {
            query,
            category_query,
            tracer: OperationTracer::new("product-query-service", metrics),
        }
    }

    async fn fetch_all(
        &self,
        filters: &ProductFilters,
    ) -> Result<Vec<ProductResponse>, RepositoryError> {
        let products = self.query.find_all(filters).await?;
        with_categories(&self.category_query, products).await
    }
}

/// Attaches the owning category of each product with a single lookup.
pub(crate) async fn with_categories(
    category_query: &DynCategoryQueryRepository,
    products: Vec<ProductModel>,
) -> Result<Vec<ProductResponse>, RepositoryError> {
    let mut ids: Vec<i32> = products.iter().filter_map(|p| p.category_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let categories: HashMap<i32, CategoryModel> = category_query
        .find_by_ids(&ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(products
        .into_iter()
        .map(|product| {
            let category = product
                .category_id
                .and_then(|id| categories.get(&id).cloned());
            ProductResponse::new(product, category)
        })
        .collect())
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self, req: &FindAllProducts) -> Result<Vec<ProductResponse>, ServiceError> {
        info!(
            "🔍 Finding all products | search: {:?}, price: {:?}..{:?}",
            req.search, req.min_price, req.max_price
        );

        let filters = ProductFilters::from_params(req);

        let tracing_ctx = self.tracer.start_tracing(
            "product_find_all",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("search", req.search.clone().unwrap_or_default()),
            ],
        );

        let result = self.fetch_all(&filters).await.map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound("No products found".into()),
            other => {
                error!("❌ Failed to fetch products: {other}");
                ServiceError::Internal("Failed to fetch products".into())
            }
        });

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Products retrieved");
        result
    }

    async fn find_by_id(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        info!("🆔 Finding product by ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "product_find_by_id",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let result = async {
            let product = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Product not found".into()))?;

            let mut loaded = with_categories(&self.category_query, vec![product]).await?;
            loaded
                .pop()
                .ok_or_else(|| ServiceError::NotFound("Product not found".into()))
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Product retrieved");
        result
    }
}
