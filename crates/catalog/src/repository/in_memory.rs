use crate::{
    abstract_trait::{
        product::repository::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        reference::{CategoryRepositoryTrait, StatusRepositoryTrait},
        sync::SyncRepositoryTrait,
    },
    domain::requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
    model::{Category, Product, ProductDetail, Status},
    sync::{CandidateRecord, ProductChange, UpsertOutcome},
    validation::PRICE_SCALE,
};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    statuses: Vec<Status>,
    products: Vec<Product>,
    next_category_id: i32,
    next_status_id: i32,
    next_product_id: i32,
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Price as the `NUMERIC(15, 2)` column would hand it back.
fn money(price: Decimal) -> Decimal {
    let mut price = price.round_dp(PRICE_SCALE);
    price.rescale(PRICE_SCALE);
    price
}

impl Tables {
    fn category_id(&mut self, name: &str) -> (i32, bool) {
        if let Some(c) = self.categories.iter().find(|c| c.name == name) {
            return (c.category_id, false);
        }
        self.next_category_id += 1;
        let ts = now();
        self.categories.push(Category {
            category_id: self.next_category_id,
            name: name.to_string(),
            created_at: Some(ts),
            updated_at: Some(ts),
        });
        (self.next_category_id, true)
    }

    fn status_id(&mut self, name: &str) -> (i32, bool) {
        if let Some(s) = self.statuses.iter().find(|s| s.name == name) {
            return (s.status_id, false);
        }
        self.next_status_id += 1;
        let ts = now();
        self.statuses.push(Status {
            status_id: self.next_status_id,
            name: name.to_string(),
            created_at: Some(ts),
            updated_at: Some(ts),
        });
        (self.next_status_id, true)
    }

    fn find_status(&self, name: &str) -> Option<i32> {
        self.statuses
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.status_id)
    }

    fn check_references(&self, category_id: i32, status_id: i32) -> Result<(), RepositoryError> {
        if !self.categories.iter().any(|c| c.category_id == category_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "category {category_id} does not exist"
            )));
        }
        if !self.statuses.iter().any(|s| s.status_id == status_id) {
            return Err(RepositoryError::ForeignKey(format!(
                "status {status_id} does not exist"
            )));
        }
        Ok(())
    }

    fn detail(&self, product: &Product) -> Result<ProductDetail, RepositoryError> {
        let category = self
            .categories
            .iter()
            .find(|c| c.category_id == product.category_id)
            .ok_or_else(|| RepositoryError::Custom("dangling category reference".into()))?;
        let status = self
            .statuses
            .iter()
            .find(|s| s.status_id == product.status_id)
            .ok_or_else(|| RepositoryError::Custom("dangling status reference".into()))?;

        Ok(ProductDetail {
            product_id: product.product_id,
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            category_id: category.category_id,
            category_name: category.name.clone(),
            status_id: status.status_id,
            status_name: status.name.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

/// Process-local catalog with the same semantics as the PostgreSQL
/// repositories. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Custom("in-memory catalog lock poisoned".into()))
    }

    /// Returns the id of the category named `name`, creating it if needed.
    pub fn insert_category(&self, name: &str) -> Result<i32, RepositoryError> {
        Ok(self.tables()?.category_id(name).0)
    }

    /// Returns the id of the status named `name`, creating it if needed.
    pub fn insert_status(&self, name: &str) -> Result<i32, RepositoryError> {
        Ok(self.tables()?.status_id(name).0)
    }

    pub fn products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.tables()?.products.clone())
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for InMemoryCatalog {
    async fn find_by_status(
        &self,
        status: &str,
        req: &FindAllProducts,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let tables = self.tables()?;
        let Some(status_id) = tables.find_status(status) else {
            return Ok(Vec::new());
        };
        let search = req.search.trim().to_lowercase();

        let mut rows = tables
            .products
            .iter()
            .filter(|p| p.status_id == status_id)
            .filter(|p| search.is_empty() || p.name.to_lowercase().contains(&search))
            .filter(|p| req.category_id.is_none_or(|id| p.category_id == id))
            .map(|p| tables.detail(p))
            .collect::<Result<Vec<_>, _>>()?;

        rows.sort_by(|a, b| {
            (b.created_at, b.product_id).cmp(&(a.created_at, a.product_id))
        });

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductDetail>, RepositoryError> {
        let tables = self.tables()?;
        tables
            .products
            .iter()
            .find(|p| p.product_id == id)
            .map(|p| tables.detail(p))
            .transpose()
    }

    async fn count_all(&self) -> Result<i64, RepositoryError> {
        Ok(self.tables()?.products.len() as i64)
    }

    async fn count_by_status(&self, status: &str) -> Result<i64, RepositoryError> {
        let tables = self.tables()?;
        let Some(status_id) = tables.find_status(status) else {
            return Ok(0);
        };

        Ok(tables
            .products
            .iter()
            .filter(|p| p.status_id == status_id)
            .count() as i64)
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for InMemoryCatalog {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ProductDetail, RepositoryError> {
        let mut tables = self.tables()?;
        tables.check_references(req.category_id, req.status_id)?;

        tables.next_product_id += 1;
        let ts = now();
        let product = Product {
            product_id: tables.next_product_id,
            name: req.name.clone(),
            price: money(req.price),
            category_id: req.category_id,
            status_id: req.status_id,
            description: req.description.clone(),
            created_at: Some(ts),
            updated_at: Some(ts),
        };

        let detail = tables.detail(&product)?;
        tables.products.push(product);
        Ok(detail)
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ProductDetail, RepositoryError> {
        let id = req
            .id
            .ok_or_else(|| RepositoryError::Custom("Product ID is required".into()))?;

        let mut tables = self.tables()?;
        tables.check_references(req.category_id, req.status_id)?;

        let product = tables
            .products
            .iter_mut()
            .find(|p| p.product_id == id)
            .ok_or(RepositoryError::NotFound)?;

        product.name = req.name.clone();
        product.price = money(req.price);
        product.category_id = req.category_id;
        product.status_id = req.status_id;
        product.description = req.description.clone();
        product.updated_at = Some(now());

        let product = product.clone();
        tables.detail(&product)
    }

    async fn delete_product(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        let before = tables.products.len();
        tables.products.retain(|p| p.product_id != id);

        if tables.products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepositoryTrait for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let mut rows = self.tables()?.categories.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepositoryError> {
        Ok(self
            .tables()?
            .categories
            .iter()
            .find(|c| c.category_id == id)
            .cloned())
    }
}

#[async_trait]
impl StatusRepositoryTrait for InMemoryCatalog {
    async fn find_all(&self) -> Result<Vec<Status>, RepositoryError> {
        let mut rows = self.tables()?.statuses.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Status>, RepositoryError> {
        Ok(self
            .tables()?
            .statuses
            .iter()
            .find(|s| s.status_id == id)
            .cloned())
    }
}

#[async_trait]
impl SyncRepositoryTrait for InMemoryCatalog {
    async fn upsert_candidate(
        &self,
        candidate: &CandidateRecord,
    ) -> Result<UpsertOutcome, RepositoryError> {
        let mut tables = self.tables()?;

        let price = money(Decimal::from(candidate.price));
        let (category_id, category_created) = tables.category_id(&candidate.category);
        let (status_id, status_created) = tables.status_id(&candidate.status);

        let existing = tables
            .products
            .iter_mut()
            .filter(|p| p.name == candidate.name)
            .min_by_key(|p| p.product_id);

        let (product_id, change) = match existing {
            Some(p)
                if p.price == price
                    && p.category_id == category_id
                    && p.status_id == status_id =>
            {
                (p.product_id, ProductChange::Unchanged)
            }
            Some(p) => {
                p.price = price;
                p.category_id = category_id;
                p.status_id = status_id;
                p.updated_at = Some(now());
                (p.product_id, ProductChange::Updated)
            }
            None => {
                tables.next_product_id += 1;
                let ts = now();
                let id = tables.next_product_id;
                tables.products.push(Product {
                    product_id: id,
                    name: candidate.name.clone(),
                    price,
                    category_id,
                    status_id,
                    description: None,
                    created_at: Some(ts),
                    updated_at: Some(ts),
                });
                (id, ProductChange::Created)
            }
        };

        Ok(UpsertOutcome {
            product_id,
            change,
            category_created,
            status_created,
        })
    }
}
