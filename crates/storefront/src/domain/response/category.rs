use crate::{
    domain::response::product::ProductSummary,
    model::{category::Category as CategoryModel, product::Product as ProductModel},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category without its products, as embedded in a product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub id: i32,
    pub name: String,
}

impl From<CategoryModel> for CategorySummary {
    fn from(value: CategoryModel) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub products: Vec<ProductSummary>,
}

impl CategoryResponse {
    pub fn new(category: CategoryModel, products: Vec<ProductModel>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            products: products.into_iter().map(ProductSummary::from).collect(),
        }
    }
}
