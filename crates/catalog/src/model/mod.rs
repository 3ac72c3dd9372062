mod category;
mod product;
mod status;

pub use self::category::Category;
pub use self::product::{Product, ProductDetail};
pub use self::status::Status;
