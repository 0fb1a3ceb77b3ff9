use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Query string of `GET /categories`.
///
/// Bounds stay raw strings: a bound that does not parse as an integer turns
/// the product-count filter off instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllCategories {
    pub search: Option<String>,
    pub min_products: Option<String>,
    pub max_products: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Books")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Books")]
    pub name: Option<String>,
}
