pub mod product;
pub mod reference;
pub mod sync;
