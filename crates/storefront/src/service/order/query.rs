use crate::{
    abstract_trait::order::{repository::DynOrderQueryRepository, service::OrderQueryServiceTrait},
    domain::response::order::OrderResponse,
    model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel},
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
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    tracer: OperationTracer,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        metrics.register("order_query_service", registry);

        Self {
            query,
            tracer: OperationTracer::new("order-query-service", metrics),
        }
    }

    async fn with_items(
        &self,
        orders: Vec<OrderModel>,
    ) -> Result<Vec<OrderResponse>, RepositoryError> {
        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

        let mut by_order: HashMap<i32, Vec<OrderItemModel>> = HashMap::new();
        for item in self.query.find_items_by_order_ids(&ids).await? {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderResponse::new(order, items)
            })
            .collect())
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(&self) -> Result<Vec<OrderResponse>, ServiceError> {
        info!("🔍 Finding all orders");

        let tracing_ctx = self.tracer.start_tracing(
            "order_find_all",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let result = async {
            let orders = self.query.find_all().await?;
            self.with_items(orders).await
        }
        .await
        .map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound("No orders found".into()),
            other => {
                error!("❌ Failed to fetch orders: {other}");
                ServiceError::Internal("Failed to fetch orders".into())
            }
        });

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Orders retrieved");
        result
    }

    async fn find_by_id(&self, id: i32) -> Result<OrderResponse, ServiceError> {
        info!("🆔 Finding order by ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "order_find_by_id",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = async {
            let order = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound("Order not found".into()))?;

            let items = self.query.find_items_by_order_ids(&[id]).await?;
            Ok::<_, ServiceError>(OrderResponse::new(order, items))
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Get, &result, "Order retrieved");
        result
    }
}
