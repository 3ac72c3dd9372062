pub mod product;
pub mod sync;
