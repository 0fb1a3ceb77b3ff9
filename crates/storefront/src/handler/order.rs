use crate::{
    abstract_trait::order::service::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::order::{CreateOrderRequest, UpdateOrderRequest},
        response::{message::MessageResponse, order::OrderResponse},
    },
    middleware::{path::resource_id, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

const NOT_FOUND: &str = "Order not found";

#[utoipa::path(
    get,
    path = "/orders",
    tag = "Order",
    responses(
        (status = 200, description = "Orders with their items", body = Vec<OrderResponse>),
        (status = 404, description = "No orders found", body = ErrorResponse),
        (status = 500, description = "Failed to fetch orders", body = ErrorResponse)
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = resource_id(&id, NOT_FOUND)?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "Order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created with its items", body = OrderResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Order or product not found", body = ErrorResponse)
    )
)]
pub async fn update_order(
    Extension(query): Extension<DynOrderQueryService>,
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<String>,
    body: Result<SimpleValidatedJson<UpdateOrderRequest>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let id = resource_id(&id, NOT_FOUND)?;
    // unknown ids answer 404 before the body is judged
    query.find_by_id(id).await?;

    let SimpleValidatedJson(body) = body?;
    let response = service.update_order(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = "Order",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order and its items deleted", body = MessageResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn delete_order(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = resource_id(&id, NOT_FOUND)?;
    service.delete_order(id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::new("Order deleted"))))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/orders", get(get_orders).post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
}
