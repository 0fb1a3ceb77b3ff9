use crate::{
    abstract_trait::{
        category::{repository::DynCategoryQueryRepository, service::CategoryQueryServiceTrait},
        product::repository::DynProductQueryRepository,
    },
    domain::{requests::category::FindAllCategories, response::category::CategoryResponse},
    filter::CategoryFilters,
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
pub struct CategoryQueryService {
    query: DynCategoryQueryRepository,
    product_query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl CategoryQueryService {
    pub fn new(
        query: DynCategoryQueryRepository,
        product_query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("category_query_service", registry);

        Self {
            query,
            product_query,
            tracer: OperationTracer::new("category-query-service", metrics),
        }
    }

    async fn fetch_all(
        &self,
        filters: &CategoryFilters,
    ) -> Result<Vec<CategoryResponse>, RepositoryError> {
        let categories = self.query.find_all(filters).await?;
        with_products(&self.product_query, categories).await
    }
}

/// Attaches each category's products with a single lookup.
pub(crate) async fn with_products(
    product_query: &DynProductQueryRepository,
    categories: Vec<CategoryModel>,
) -> Result<Vec<CategoryResponse>, RepositoryError> {
    let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
    let products = product_query.find_by_category_ids(&ids).await?;

    let mut by_category: HashMap<i32, Vec<ProductModel>> = HashMap::new();
    for product in products {
        if let Some(category_id) = product.category_id {
            by_category.entry(category_id).or_default().push(product);
        }
    }

    Ok(categories
        .into_iter()
        .map(|category| {
            let products = by_category.remove(&category.id).unwrap_or_default();
            CategoryResponse::new(category, products)
        })
        .collect())
}

#[async_trait]
impl CategoryQueryServiceTrait for CategoryQueryService {
    async fn find_all(
        &self,
        req: &FindAllCategories,
    ) -> Result<Vec<CategoryResponse>, ServiceError> {
        info!("🔍 Finding all categories | search: {:?}", req.search);

        let filters = CategoryFilters::from_params(req);

        let tracing_ctx = self.tracer.start_tracing(
            "category_find_all",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("search", req.search.clone().unwrap_or_default()),
            ],
        );

        let result = self.fetch_all(&filters).await.map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound("No categories found".into()),
            other => {
                error!("❌ Failed to fetch categories: {other}");
                ServiceError::Internal("Failed to fetch categories".into())
            }
        });

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Categories retrieved");
        result
    }

    async fn find_by_id(&self, id: i32) -> Result<CategoryResponse, ServiceError> {
        info!("🆔 Finding category by ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "category_find_by_id",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let result = async {
            let category = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Category not found".into()))?;

            let mut loaded = with_products(&self.product_query, vec![category]).await?;
            loaded
                .pop()
                .ok_or_else(|| ServiceError::NotFound("Category not found".into()))
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Category retrieved");
        result
    }
}
