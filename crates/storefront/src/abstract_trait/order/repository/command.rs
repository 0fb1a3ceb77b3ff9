use crate::{
    domain::requests::order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

/// Order writes. Each call is atomic: either the order row and all of its
/// item rows are written, or nothing is.
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
        items: &[CreateOrderItemRecordRequest],
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError>;
    /// Overwrites the order row. With `Some(items)` the stored items are
    /// replaced; with `None` they are left alone and returned as stored.
    async fn update_order(
        &self,
        order: &OrderModel,
        items: Option<&[CreateOrderItemRecordRequest]>,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError>;
    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError>;
}
