mod in_memory;
mod product;
mod reference;
mod sync;

pub use self::in_memory::InMemoryCatalog;
pub use self::product::{ProductCommandRepository, ProductQueryRepository};
pub use self::reference::{CategoryRepository, StatusRepository};
pub use self::sync::SyncRepository;

use crate::abstract_trait::{
    product::repository::{DynProductCommandRepository, DynProductQueryRepository},
    reference::{DynCategoryRepository, DynStatusRepository},
    sync::DynSyncRepository,
};
use shared::config::ConnectionPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repositories {
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub category: DynCategoryRepository,
    pub status: DynStatusRepository,
    pub sync: DynSyncRepository,
}

impl Repositories {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            product_query: Arc::new(ProductQueryRepository::new(pool.clone())),
            product_command: Arc::new(ProductCommandRepository::new(pool.clone())),
            category: Arc::new(CategoryRepository::new(pool.clone())),
            status: Arc::new(StatusRepository::new(pool.clone())),
            sync: Arc::new(SyncRepository::new(pool)),
        }
    }

    pub fn in_memory(store: &InMemoryCatalog) -> Self {
        Self {
            product_query: Arc::new(store.clone()),
            product_command: Arc::new(store.clone()),
            category: Arc::new(store.clone()),
            status: Arc::new(store.clone()),
            sync: Arc::new(store.clone()),
        }
    }
}
