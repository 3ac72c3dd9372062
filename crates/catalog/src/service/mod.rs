mod product;
mod reference;
mod sync;

pub use self::product::{ProductCommandService, ProductQueryService};
pub use self::reference::ReferenceQueryService;
pub use self::sync::CatalogSyncService;
