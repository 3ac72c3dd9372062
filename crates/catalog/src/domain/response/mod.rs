pub mod product;
pub mod reference;
