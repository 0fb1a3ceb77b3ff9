use crate::{
    abstract_trait::{
        order::{
            repository::{DynOrderCommandRepository, DynOrderQueryRepository},
            service::OrderCommandServiceTrait,
        },
        product::repository::DynProductQueryRepository,
    },
    domain::{
        requests::{
            order::{
                CreateOrderItemRecordRequest, CreateOrderItemRequest, CreateOrderRecordRequest,
                CreateOrderRequest, UpdateOrderRequest,
            },
            validation_messages,
        },
        response::order::OrderResponse,
    },
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, OperationTracer},
};
use tracing::{info, warn};
use validator::Validate;

const NOT_FOUND: &str = "Order not found";

#[derive(Clone)]
pub struct OrderCommandService {
    query: DynOrderQueryRepository,
    command: DynOrderCommandRepository,
    product_query: DynProductQueryRepository,
    tracer: OperationTracer,
}

impl OrderCommandService {
    pub fn new(
        query: DynOrderQueryRepository,
        command: DynOrderCommandRepository,
        product_query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register("order_command_service", registry);

        Self {
            query,
            command,
            product_query,
            tracer: OperationTracer::new("order-command-service", metrics),
        }
    }

    /// Fails with "Product not found" unless every item names a stored product.
    async fn ensure_products_exist(
        &self,
        items: &[CreateOrderItemRequest],
    ) -> Result<(), ServiceError> {
        let mut wanted: Vec<i32> = items.iter().map(|item| item.product_id).collect();
        wanted.sort_unstable();
        wanted.dedup();

        let existing = self.product_query.find_existing_ids(&wanted).await?;

        if let Some(missing) = wanted.iter().find(|id| !existing.contains(id)) {
            warn!("⚠️ Order references unknown product {missing}");
            return Err(ServiceError::NotFound("Product not found".into()));
        }

        Ok(())
    }
}

fn validate_items(items: &[CreateOrderItemRequest]) -> Result<(), ServiceError> {
    let mut messages = Vec::new();
    for (index, item) in items.iter().enumerate() {
        if let Err(errors) = item.validate() {
            messages.extend(
                validation_messages(&errors)
                    .into_iter()
                    .map(|m| format!("items[{index}].{m}")),
            );
        }
    }

    if messages.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(messages))
    }
}

fn to_records(items: &[CreateOrderItemRequest]) -> Vec<CreateOrderItemRecordRequest> {
    items.iter().map(CreateOrderItemRecordRequest::from).collect()
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderResponse, ServiceError> {
        info!(
            "🏗️ Creating order for user {} with {} items",
            req.user_id,
            req.items.len()
        );

        let tracing_ctx = self.tracer.start_tracing(
            "order_create",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("user.id", req.user_id.to_string()),
            ],
        );

        let result = async {
            self.ensure_products_exist(&req.items).await?;

            let record = CreateOrderRecordRequest::from(req);
            let (order, items) = self
                .command
                .create_order(&record, &to_records(&req.items))
                .await?;

            Ok::<_, ServiceError>(OrderResponse::new(order, items))
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Post, &result, "Order created");
        result
    }

    async fn update_order(
        &self,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<OrderResponse, ServiceError> {
        info!("🔄 Updating order ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "order_update",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "update"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = async {
            let mut order = self
                .query
                .find_by_id(id)
                .await?
                .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.into()))?;

            if let Some(items) = &req.items {
                validate_items(items)?;
                self.ensure_products_exist(items).await?;
            }

            if let Some(user_id) = req.user_id {
                order.user_id = user_id;
            }
            if let Some(status) = &req.status {
                order.status = status.clone();
            }
            if let Some(total) = req.total {
                order.total = total;
            }
            if let Some(placed_at) = req.placed_at {
                order.placed_at = placed_at;
            }

            let records = req.items.as_deref().map(to_records);
            let (order, items) = self
                .command
                .update_order(&order, records.as_deref())
                .await
                .map_err(|err| ServiceError::from_repo(err, NOT_FOUND))?;

            Ok::<_, ServiceError>(OrderResponse::new(order, items))
        }
        .await;

        self.tracer
            .finish(&tracing_ctx, Method::Put, &result, "Order updated");
        result
    }

    async fn delete_order(&self, id: i32) -> Result<(), ServiceError> {
        info!("🗑️ Deleting order ID: {id}");

        let tracing_ctx = self.tracer.start_tracing(
            "order_delete",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("order.id", id.to_string()),
            ],
        );

        let result = self
            .command
            .delete_order(id)
            .await
            .map_err(|err| ServiceError::from_repo(err, NOT_FOUND));

        self.tracer
            .finish(&tracing_ctx, Method::Delete, &result, "Order deleted");
        result
    }
}
