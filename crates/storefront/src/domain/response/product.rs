use crate::{
    domain::response::category::CategorySummary,
    model::{category::Category as CategoryModel, product::Product as ProductModel},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product without its category, as embedded in a category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub category_id: Option<i32>,
}

impl From<ProductModel> for ProductSummary {
    fn from(value: ProductModel) -> Self {
        Self {
            id: value.id,
            name: value.name,
            price: value.price,
            category_id: value.category_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub category_id: Option<i32>,
    pub category: Option<CategorySummary>,
}

impl ProductResponse {
    pub fn new(product: ProductModel, category: Option<CategoryModel>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            category_id: product.category_id,
            category: category.map(CategorySummary::from),
        }
    }
}
