//! Wire-format decoding for catalog responses.
//!
//! Catalog payloads are duck-typed: identifiers arrive as strings or numbers,
//! optional fields are missing, empty, or hold placeholder text. Decoding is
//! therefore split in two layers. The envelope (a `products` array, a `tags`
//! array, a barcode `status`) is structurally required and its absence is a
//! [`FoodlensError::Decode`]. Everything inside a product is read leniently and
//! never fails the batch.

use crate::domain::error::{FoodlensError, Result};
use crate::domain::product::{normalize_grade, CategorySummary, ProductRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Envelope of every paginated product listing (search, category, default).
#[derive(Debug, Deserialize)]
struct ProductPage {
    products: Vec<Value>,
}

/// Envelope of the barcode lookup endpoint.
#[derive(Debug, Deserialize)]
struct BarcodeEnvelope {
    #[serde(default)]
    status: Value,
    #[serde(default)]
    status_verbose: Option<String>,
    #[serde(default)]
    product: Option<Value>,
}

/// Envelope of the category index endpoint.
#[derive(Debug, Deserialize)]
struct CategoryIndex {
    tags: Vec<Value>,
}

/// Raw product object. Every field is kept as a JSON value and interpreted
/// afterwards so that unexpected types degrade to "absent".
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireProduct {
    code: Value,
    id: Value,
    #[serde(rename = "_id")]
    storage_id: Value,
    product_name: Value,
    brands: Value,
    categories: Value,
    ingredients_text: Value,
    labels: Value,
    allergens: Value,
    packaging: Value,
    quantity: Value,
    countries: Value,
    image_url: Value,
    image_small_url: Value,
    image_thumb_url: Value,
    image_front_url: Value,
    nutrition_grades: Value,
    nutrition_grade_fr: Value,
    nutriments: Value,
}

impl From<WireProduct> for ProductRecord {
    fn from(wire: WireProduct) -> Self {
        let nutrition_grade = text(&wire.nutrition_grades)
            .and_then(|g| normalize_grade(&g))
            .or_else(|| text(&wire.nutrition_grade_fr).and_then(|g| normalize_grade(&g)));

        Self {
            code: text(&wire.code),
            id: text(&wire.id),
            storage_id: text(&wire.storage_id),
            name: text(&wire.product_name),
            brands: text(&wire.brands),
            categories: text(&wire.categories),
            ingredients_text: text(&wire.ingredients_text),
            labels: text(&wire.labels),
            allergens: text(&wire.allergens),
            packaging: text(&wire.packaging),
            quantity: text(&wire.quantity),
            countries: text(&wire.countries),
            image_url: text(&wire.image_url),
            image_small_url: text(&wire.image_small_url),
            image_thumb_url: text(&wire.image_thumb_url),
            image_front_url: text(&wire.image_front_url),
            nutrition_grade,
            nutriments: numeric_map(&wire.nutriments),
        }
    }
}

/// Reads a JSON value as non-empty text. Numbers are rendered, other types
/// and empty strings are treated as absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a JSON value as a number, accepting numeric strings.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Keeps the numeric entries of the `nutriments` object.
fn numeric_map(value: &Value) -> BTreeMap<String, f64> {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter_map(|(key, v)| number(v).map(|n| (key.clone(), n)))
                .collect()
        })
        .unwrap_or_default()
}

/// Decodes one product object. Non-object values yield `None`.
pub fn decode_product(value: Value) -> Option<ProductRecord> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value::<WireProduct>(value)
        .ok()
        .map(ProductRecord::from)
}

/// Decodes a paginated product listing.
///
/// # Errors
///
/// Returns [`FoodlensError::Decode`] if the body is not JSON or lacks the
/// top-level `products` array.
pub fn decode_product_page(body: &[u8]) -> Result<Vec<ProductRecord>> {
    let page: ProductPage = serde_json::from_slice(body)
        .map_err(|e| FoodlensError::Decode(format!("product page: {e}")))?;

    let total = page.products.len();
    let records: Vec<ProductRecord> = page.products.into_iter().filter_map(decode_product).collect();

    if records.len() != total {
        tracing::debug!(
            total = total,
            decoded = records.len(),
            "skipped non-object entries in product page"
        );
    }

    Ok(records)
}

/// Decodes a barcode lookup response.
///
/// # Errors
///
/// - [`FoodlensError::NotFound`] when the catalog reports `status: 0` or omits
///   the product object
/// - [`FoodlensError::Decode`] when the body is not a JSON object
pub fn decode_barcode(body: &[u8], code: &str) -> Result<ProductRecord> {
    let envelope: BarcodeEnvelope = serde_json::from_slice(body)
        .map_err(|e| FoodlensError::Decode(format!("barcode response: {e}")))?;

    if number(&envelope.status) == Some(0.0) {
        let reason = envelope
            .status_verbose
            .unwrap_or_else(|| "product not found".to_string());
        return Err(FoodlensError::NotFound(format!("{code}: {reason}")));
    }

    envelope
        .product
        .and_then(decode_product)
        .ok_or_else(|| FoodlensError::NotFound(format!("{code}: response has no product")))
}

/// Decodes the category index without shaping it.
///
/// Tags without an identifier are skipped; a missing count reads as zero.
///
/// # Errors
///
/// Returns [`FoodlensError::Decode`] if the body lacks the `tags` array.
pub fn decode_category_index(body: &[u8]) -> Result<Vec<CategorySummary>> {
    let index: CategoryIndex = serde_json::from_slice(body)
        .map_err(|e| FoodlensError::Decode(format!("category index: {e}")))?;

    Ok(index
        .tags
        .iter()
        .filter_map(|tag| {
            let identifier = text(tag.get("id")?)?;
            let display_name = tag
                .get("name")
                .and_then(text)
                .unwrap_or_else(|| identifier.clone());
            let product_count = tag
                .get("products")
                .and_then(number)
                .map_or(0, |n| if n.is_sign_negative() { 0 } else { n as u64 });
            Some(CategorySummary {
                identifier,
                display_name,
                product_count,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_page_tolerates_missing_and_mistyped_fields() {
        let body = br#"{
            "count": 2,
            "products": [
                {"code": 3017620422003, "product_name": "Nutella", "brands": "Ferrero",
                 "nutrition_grades": "E", "nutriments": {"fat_100g": 30.9, "sugars_100g": "56.3", "energy_unit": "kcal"}},
                {"_id": "abc", "product_name": "", "brands": null, "nutrition_grades": "unknown"},
                "not-an-object"
            ]
        }"#;

        let records = decode_product_page(body).unwrap();
        assert_eq!(records.len(), 2);

        let nutella = &records[0];
        assert_eq!(nutella.identifier(), Some("3017620422003"));
        assert_eq!(nutella.name.as_deref(), Some("Nutella"));
        assert_eq!(nutella.nutrition_grade.as_deref(), Some("e"));
        assert_eq!(nutella.nutrient("fat_100g"), Some(30.9));
        assert_eq!(nutella.nutrient("sugars_100g"), Some(56.3));
        assert_eq!(nutella.nutrient("energy_unit"), None);

        let sparse = &records[1];
        assert_eq!(sparse.identifier(), Some("abc"));
        assert_eq!(sparse.name, None);
        assert_eq!(sparse.brands, None);
        assert_eq!(sparse.nutrition_grade, None);
    }

    #[test]
    fn product_page_without_products_array_is_a_decode_error() {
        let err = decode_product_page(br#"{"count": 0}"#).unwrap_err();
        assert!(matches!(err, FoodlensError::Decode(_)));

        let err = decode_product_page(b"<html>busy</html>").unwrap_err();
        assert!(matches!(err, FoodlensError::Decode(_)));
    }

    #[test]
    fn grade_falls_back_to_french_field() {
        let record = decode_product(serde_json::json!({
            "code": "1",
            "nutrition_grade_fr": "c"
        }))
        .unwrap();
        assert_eq!(record.nutrition_grade.as_deref(), Some("c"));
    }

    #[test]
    fn barcode_status_zero_is_not_found() {
        let body = br#"{"code": "000000000000", "status": 0, "status_verbose": "product not found"}"#;
        let err = decode_barcode(body, "000000000000").unwrap_err();
        assert!(matches!(err, FoodlensError::NotFound(_)));
    }

    #[test]
    fn barcode_without_product_is_not_found() {
        let err = decode_barcode(br#"{"status": 1}"#, "123").unwrap_err();
        assert!(matches!(err, FoodlensError::NotFound(_)));
    }

    #[test]
    fn barcode_hit_decodes_product() {
        let body = br#"{"status": 1, "product": {"code": "737628064502", "product_name": "Thai peanut noodle kit"}}"#;
        let record = decode_barcode(body, "737628064502").unwrap();
        assert_eq!(record.identifier(), Some("737628064502"));
    }

    #[test]
    fn category_index_reads_tags() {
        let body = br#"{"count": 3, "tags": [
            {"id": "en:snacks", "name": "Snacks", "products": 120000},
            {"name": "No id"},
            {"id": "en:rare", "products": 3}
        ]}"#;
        let tags = decode_category_index(body).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].display_name, "Snacks");
        assert_eq!(tags[0].product_count, 120_000);
        assert_eq!(tags[1].display_name, "en:rare");
    }
}
