use crate::model::ProductDetail;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    #[schema(example = "5000.00")]
    pub price: Decimal,
    pub category_id: i32,
    pub category: String,
    pub status_id: i32,
    pub status: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<ProductDetail> for ProductResponse {
    fn from(value: ProductDetail) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            price: value.price,
            category_id: value.category_id,
            category: value.category_name,
            status_id: value.status_id,
            status: value.status_name,
            description: value.description,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductCounts {
    pub total: i64,
    pub sellable: i64,
}
