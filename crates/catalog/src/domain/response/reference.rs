use crate::model::{Category, Status};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(value: Category) -> Self {
        CategoryResponse {
            id: value.category_id,
            name: value.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct StatusResponse {
    pub id: i32,
    pub name: String,
}

impl From<Status> for StatusResponse {
    fn from(value: Status) -> Self {
        StatusResponse {
            id: value.status_id,
            name: value.name,
        }
    }
}
