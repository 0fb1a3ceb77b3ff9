use crate::{
    abstract_trait::category::service::{DynCategoryCommandService, DynCategoryQueryService},
    domain::{
        requests::category::{CreateCategoryRequest, FindAllCategories, UpdateCategoryRequest},
        response::{category::CategoryResponse, message::MessageResponse},
    },
    middleware::{path::resource_id, validate::SimpleValidatedJson},
    state::AppState,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

const NOT_FOUND: &str = "Category not found";

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Category",
    params(FindAllCategories),
    responses(
        (status = 200, description = "Categories with their products", body = Vec<CategoryResponse>),
        (status = 404, description = "No categories found", body = ErrorResponse),
        (status = 500, description = "Failed to fetch categories", body = ErrorResponse)
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynCategoryQueryService>,
    Query(params): Query<FindAllCategories>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "Category",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn get_category(
    Extension(service): Extension<DynCategoryQueryService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = resource_id(&id, NOT_FOUND)?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/categories",
    tag = "Category",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_category(
    Extension(service): Extension<DynCategoryCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create_category(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "Category",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn update_category(
    Extension(query): Extension<DynCategoryQueryService>,
    Extension(service): Extension<DynCategoryCommandService>,
    Path(id): Path<String>,
    body: Result<SimpleValidatedJson<UpdateCategoryRequest>, HttpError>,
) -> Result<impl IntoResponse, HttpError> {
    let id = resource_id(&id, NOT_FOUND)?;
    // unknown ids answer 404 before the body is judged
    query.find_by_id(id).await?;

    let SimpleValidatedJson(body) = body?;
    let response = service.update_category(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "Category",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn delete_category(
    Extension(service): Extension<DynCategoryCommandService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = resource_id(&id, NOT_FOUND)?;
    service.delete_category(id).await?;
    Ok((StatusCode::OK, Json(MessageResponse::new("Category deleted"))))
}

pub fn category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/categories", get(get_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        .layer(Extension(app_state.di_container.category_query.clone()))
        .layer(Extension(app_state.di_container.category_command.clone()))
}
