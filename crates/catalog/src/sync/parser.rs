use crate::sync::{CandidateRecord, RawResponse};
use serde_json::Value;
use tracing::{debug, warn};

/// Top-level field holding the product array.
pub const COLLECTION_FIELD: &str = "data";

const NAME_FIELD: &str = "nama_produk";
const PRICE_FIELD: &str = "harga";
const CATEGORY_FIELD: &str = "kategori";
const STATUS_FIELD: &str = "status";

/// Turns the upstream payload into candidates, skipping entries with a blank
/// name or a price that is not strictly positive.
pub fn parse(raw: &RawResponse) -> Vec<CandidateRecord> {
    let Some(items) = raw.collection() else {
        warn!("⚠️ Upstream response has no `{COLLECTION_FIELD}` array");
        return Vec::new();
    };

    let mut candidates = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let name = text_field(item, NAME_FIELD);
        let price = item.get(PRICE_FIELD).and_then(coerce_price).unwrap_or(0);

        if name.trim().is_empty() || price <= 0 {
            debug!("Dropping upstream entry #{index}: name={name:?} price={price}");
            continue;
        }

        candidates.push(CandidateRecord {
            name,
            price,
            category: text_field(item, CATEGORY_FIELD),
            status: text_field(item, STATUS_FIELD),
        });
    }

    debug!(
        "Parsed {} of {} upstream entries",
        candidates.len(),
        items.len()
    );

    candidates
}

/// Integer price from a JSON number or numeric string.
///
/// Floats are truncated toward zero. Returns `None` for anything that cannot
/// be read as an `i64`.
pub fn coerce_price(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            let truncated = f.trunc();
            if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64
            {
                Some(truncated as i64)
            } else {
                None
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn text_field(item: &Value, field: &str) -> String {
    item.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawResponse {
        RawResponse(value)
    }

    #[test]
    fn maps_upstream_fields() {
        let payload = raw(json!({
            "data": [
                {"id_produk": "6", "nama_produk": "Pen", "harga": "5000",
                 "kategori": "Stationery", "status": "sellable"}
            ]
        }));

        assert_eq!(
            parse(&payload),
            vec![CandidateRecord {
                name: "Pen".into(),
                price: 5000,
                category: "Stationery".into(),
                status: "sellable".into(),
            }]
        );
    }

    #[test]
    fn drops_blank_names_and_non_positive_prices() {
        let payload = raw(json!({
            "data": [
                {"nama_produk": "Zero", "harga": "0", "kategori": "A", "status": "s"},
                {"nama_produk": "Negative", "harga": "-10", "kategori": "A", "status": "s"},
                {"nama_produk": "", "harga": "100", "kategori": "A", "status": "s"},
                {"nama_produk": "   ", "harga": 100, "kategori": "A", "status": "s"},
                {"nama_produk": "NoPrice", "kategori": "A", "status": "s"},
                {"nama_produk": "Garbage", "harga": "abc", "kategori": "A", "status": "s"},
                {"nama_produk": "Kept", "harga": 12, "kategori": "A", "status": "s"},
                "not an object"
            ]
        }));

        let parsed = parse(&payload);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "Kept");
        assert!(parsed.iter().all(|c| !c.name.trim().is_empty() && c.price > 0));
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let payload = raw(json!({"data": [{"nama_produk": "Mug", "harga": 25000}]}));
        let parsed = parse(&payload);
        assert_eq!(parsed[0].category, "");
        assert_eq!(parsed[0].status, "");
    }

    #[test]
    fn price_coercion() {
        assert_eq!(coerce_price(&json!(5000)), Some(5000));
        assert_eq!(coerce_price(&json!(5000.9)), Some(5000));
        assert_eq!(coerce_price(&json!(-0.5)), Some(0));
        assert_eq!(coerce_price(&json!(" 42 ")), Some(42));
        assert_eq!(coerce_price(&json!("12.5")), None);
        assert_eq!(coerce_price(&json!(null)), None);
        assert_eq!(coerce_price(&json!(true)), None);
    }

    #[test]
    fn parsing_is_repeatable() {
        let payload = raw(json!({
            "data": [
                {"nama_produk": "Pen", "harga": "5000", "kategori": "Stationery", "status": "sellable"},
                {"nama_produk": "Ink", "harga": 7000, "kategori": "Stationery", "status": "not sellable"}
            ]
        }));

        assert_eq!(parse(&payload), parse(&payload));
    }

    #[test]
    fn missing_or_malformed_collection_yields_nothing() {
        assert!(parse(&raw(json!({"error": 0}))).is_empty());
        assert!(parse(&raw(json!({"data": "nope"}))).is_empty());
        assert!(parse(&raw(json!([1, 2, 3]))).is_empty());
        assert!(!raw(json!({"error": 0})).has_collection());
        assert_eq!(raw(json!({"data": [1, 2]})).item_count(), 2);
    }
}
