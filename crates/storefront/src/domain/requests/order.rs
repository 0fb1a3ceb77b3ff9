use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_ORDER_STATUS: &str = "pending";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderItemRequest {
    /// Must name a stored product; any other id is answered with 404.
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2)]
    pub quantity: i32,

    #[validate(range(min = 0.0, message = "Unit price cannot be negative"))]
    #[schema(example = 10.0)]
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "User id must be positive"))]
    #[schema(example = 1)]
    pub user_id: i32,

    /// Defaults to `pending`.
    pub status: Option<String>,

    /// Defaults to the sum of `quantity * unit_price` over the items.
    #[validate(range(min = 0.0, message = "Total cannot be negative"))]
    pub total: Option<f64>,

    /// Defaults to the time of insertion.
    pub placed_at: Option<DateTime<Utc>>,

    #[validate(
        length(min = 1, message = "Order must contain at least one item"),
        nested
    )]
    pub items: Vec<CreateOrderItemRequest>,
}

impl CreateOrderRequest {
    pub fn items_total(&self) -> f64 {
        items_total(&self.items)
    }
}

/// Partial order update. When `items` is present the order's items are
/// replaced wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderRequest {
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: Option<i32>,

    #[schema(example = "paid")]
    pub status: Option<String>,

    #[validate(range(min = 0.0, message = "Total cannot be negative"))]
    pub total: Option<f64>,

    pub placed_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub items: Option<Vec<CreateOrderItemRequest>>,
}

/// Row values for inserting an order, defaults already resolved.
#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub user_id: i32,
    pub status: String,
    pub total: f64,
    pub placed_at: DateTime<Utc>,
}

impl From<&CreateOrderRequest> for CreateOrderRecordRequest {
    fn from(req: &CreateOrderRequest) -> Self {
        Self {
            user_id: req.user_id,
            status: req
                .status
                .clone()
                .unwrap_or_else(|| DEFAULT_ORDER_STATUS.to_string()),
            total: req.total.unwrap_or_else(|| req.items_total()),
            placed_at: req.placed_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderItemRecordRequest {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: f64,
}

impl From<&CreateOrderItemRequest> for CreateOrderItemRecordRequest {
    fn from(item: &CreateOrderItemRequest) -> Self {
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
        }
    }
}

pub fn items_total(items: &[CreateOrderItemRequest]) -> f64 {
    items
        .iter()
        .map(|item| f64::from(item.quantity) * item.unit_price)
        .sum()
}
