use crate::validation::validate_product_fields;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllProducts {
    /// Case-insensitive substring of the product name.
    #[serde(default)]
    pub search: String,

    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Pen")]
    pub name: String,

    #[schema(example = "5000.00")]
    pub price: Decimal,

    #[schema(example = 1)]
    pub category_id: i32,

    #[schema(example = 1)]
    pub status_id: i32,

    #[serde(default)]
    pub description: Option<String>,
}

impl CreateProductRequest {
    /// Same request with surrounding whitespace stripped from the name.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        }
    }
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_product_fields(&self.name, self.price, self.category_id, self.status_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub id: Option<i32>,

    #[schema(example = "Pen")]
    pub name: String,

    #[schema(example = "5500.50")]
    pub price: Decimal,

    #[schema(example = 1)]
    pub category_id: i32,

    #[schema(example = 1)]
    pub status_id: i32,

    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateProductRequest {
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        }
    }
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        validate_product_fields(&self.name, self.price, self.category_id, self.status_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_shared_rules() {
        let req = CreateProductRequest {
            name: "Pe".into(),
            price: Decimal::from(5000),
            category_id: 1,
            status_id: 1,
            description: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));

        let req = CreateProductRequest {
            name: "Pen".into(),
            ..req
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn price_reads_numbers_and_strings() {
        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name": "Pen", "price": 5000.5, "category_id": 1, "status_id": 1}"#,
        )
        .unwrap();
        assert_eq!(req.price, Decimal::new(50005, 1));

        let req: CreateProductRequest = serde_json::from_str(
            r#"{"name": "Pen", "price": "5000.50", "category_id": 1, "status_id": 1}"#,
        )
        .unwrap();
        assert_eq!(req.price, Decimal::new(500050, 2));
    }

    #[test]
    fn trimmed_strips_only_the_name() {
        let req = UpdateProductRequest {
            id: Some(4),
            name: "  Pen \t".into(),
            price: Decimal::from(5000),
            category_id: 1,
            status_id: 2,
            description: Some(" Blue ink ".into()),
        };

        let trimmed = req.trimmed();
        assert_eq!(trimmed.name, "Pen");
        assert_eq!(trimmed.id, Some(4));
        assert_eq!(trimmed.description.as_deref(), Some(" Blue ink "));
    }

    #[test]
    fn search_defaults_to_empty() {
        let params: FindAllProducts = serde_json::from_str("{}").unwrap();
        assert!(params.search.is_empty());
        assert_eq!(params.category_id, None);
    }
}
