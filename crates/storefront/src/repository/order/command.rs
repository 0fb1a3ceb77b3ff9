use crate::{
    abstract_trait::order::repository::OrderCommandRepositoryTrait,
    domain::requests::order::{CreateOrderItemRecordRequest, CreateOrderRecordRequest},
    model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::{error, info};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

async fn insert_items(
    conn: &mut PgConnection,
    order_id: i32,
    items: &[CreateOrderItemRecordRequest],
) -> Result<Vec<OrderItemModel>, sqlx::Error> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO order_items (order_id, product_id, quantity, unit_price) ",
    );
    builder.push_values(items, |mut row, item| {
        row.push_bind(order_id)
            .push_bind(item.product_id)
            .push_bind(item.quantity)
            .push_bind(item.unit_price);
    });
    builder.push(" RETURNING id, order_id, product_id, quantity, unit_price");

    let mut inserted = builder
        .build_query_as::<OrderItemModel>()
        .fetch_all(&mut *conn)
        .await?;
    inserted.sort_by_key(|item| item.id);

    Ok(inserted)
}

async fn select_items(
    conn: &mut PgConnection,
    order_id: i32,
) -> Result<Vec<OrderItemModel>, sqlx::Error> {
    sqlx::query_as::<_, OrderItemModel>(
        r#"
        SELECT id, order_id, product_id, quantity, unit_price
        FROM order_items
        WHERE order_id = $1
        ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
        items: &[CreateOrderItemRecordRequest],
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let order = sqlx::query_as::<_, OrderModel>(
            r#"
            INSERT INTO orders (user_id, status, total, placed_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, status, total, placed_at
            "#,
        )
        .bind(req.user_id)
        .bind(&req.status)
        .bind(req.total)
        .bind(req.placed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create order for user {}: {:?}",
                req.user_id, err
            );
            RepositoryError::from(err)
        })?;

        let inserted = insert_items(&mut tx, order.id, items)
            .await
            .map_err(|err| {
                error!("❌ Failed to insert items of order {}: {:?}", order.id, err);
                RepositoryError::from(err)
            })?;

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {:?}", order.id, err);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order ID {} for user {} with {} items",
            order.id,
            order.user_id,
            inserted.len()
        );
        Ok((order, inserted))
    }

    async fn update_order(
        &self,
        order: &OrderModel,
        items: Option<&[CreateOrderItemRecordRequest]>,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let updated = sqlx::query_as::<_, OrderModel>(
            r#"
            UPDATE orders
            SET user_id   = $2,
                status    = $3,
                total     = $4,
                placed_at = $5
            WHERE id = $1
            RETURNING id, user_id, status, total, placed_at
            "#,
        )
        .bind(order.id)
        .bind(order.user_id)
        .bind(&order.status)
        .bind(order.total)
        .bind(order.placed_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to update order ID {}: {:?}", order.id, err);
            RepositoryError::from(err)
        })?;

        let stored_items = match items {
            Some(items) => {
                sqlx::query("DELETE FROM order_items WHERE order_id = $1")
                    .bind(order.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|err| {
                        error!("❌ Failed to clear items of order {}: {:?}", order.id, err);
                        RepositoryError::from(err)
                    })?;

                insert_items(&mut tx, order.id, items).await
            }
            None => select_items(&mut tx, order.id).await,
        }
        .map_err(|err| {
            error!("❌ Failed to write items of order {}: {:?}", order.id, err);
            RepositoryError::from(err)
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!("🔄 Updated order ID {}", updated.id);
        Ok((updated, stored_items))
    }

    async fn delete_order(&self, id: i32) -> Result<(), RepositoryError> {
        info!("❌ Deleting order: {}", id);

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
