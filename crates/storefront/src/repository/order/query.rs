use crate::{
    abstract_trait::order::repository::OrderQueryRepositoryTrait,
    model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(&self) -> Result<Vec<OrderModel>, RepositoryError> {
        info!("🔍 Fetching all orders");

        let mut conn = self.db.acquire().await.map_err(|e| {
            error!("❌ Failed to acquire DB connection: {:?}", e);
            RepositoryError::from(e)
        })?;

        let orders = sqlx::query_as::<_, OrderModel>(
            "SELECT id, user_id, status, total, placed_at FROM orders ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Found {} orders", orders.len());
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        info!("🆔 Fetching order by ID: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            "SELECT id, user_id, status, total, placed_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        Ok(order)
    }

    async fn find_items_by_order_ids(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemModel>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let items = sqlx::query_as::<_, OrderItemModel>(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch items of orders {:?}: {:?}", order_ids, e);
            RepositoryError::from(e)
        })?;

        Ok(items)
    }
}
