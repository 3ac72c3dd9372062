mod command;
mod query;

pub use self::command::ProductCommandRepository;
pub use self::query::ProductQueryRepository;

/// Columns of [`ProductDetail`](crate::model::ProductDetail); expects `p`,
/// `c` and `s` aliases for products, categories and statuses.
pub(super) const DETAIL_COLUMNS: &str = r#"
    p.product_id,
    p.name,
    p.price,
    p.description,
    p.category_id,
    c.name AS category_name,
    p.status_id,
    s.name AS status_name,
    p.created_at,
    p.updated_at
"#;
