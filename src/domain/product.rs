//! Product and category domain models.
//!
//! The catalog returns loosely-typed records where almost every field may be
//! missing. [`ProductRecord`] keeps each field as an explicit `Option` and exposes
//! ordered-fallback resolvers for the field families that have several sources
//! (identifier, grid image, detail image). Every reader of those families goes
//! through the resolvers so the precedence is defined in exactly one place.

use std::collections::BTreeMap;

/// Letters accepted as a nutrition grade.
const NUTRITION_GRADES: [&str; 5] = ["a", "b", "c", "d", "e"];

/// One catalog item as seen by the coordinator and the UI.
///
/// Empty strings are normalized to `None` during decoding, so `Some(_)` always
/// carries a non-empty value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductRecord {
    /// Barcode (`code` on the wire). First choice for [`Self::identifier`].
    pub code: Option<String>,
    /// Secondary identifier (`id` on the wire).
    pub id: Option<String>,
    /// Storage identifier (`_id` on the wire). Last choice for the identifier.
    pub storage_id: Option<String>,

    /// Display name (`product_name`).
    pub name: Option<String>,
    /// Comma-joined brand list.
    pub brands: Option<String>,
    /// Comma-joined category tags, most generic first.
    pub categories: Option<String>,
    pub ingredients_text: Option<String>,
    /// Comma-joined label tags (`en:organic, en:fair-trade`).
    pub labels: Option<String>,
    /// Comma-joined allergen tags.
    pub allergens: Option<String>,
    pub packaging: Option<String>,
    pub quantity: Option<String>,
    pub countries: Option<String>,

    pub image_url: Option<String>,
    pub image_small_url: Option<String>,
    pub image_thumb_url: Option<String>,
    pub image_front_url: Option<String>,

    /// Lowercase nutrition grade in `a..=e`, `None` when unknown.
    pub nutrition_grade: Option<String>,

    /// Nutrient values keyed by catalog key (`fat_100g`, `energy-kcal_100g`, ...).
    pub nutriments: BTreeMap<String, f64>,
}

impl ProductRecord {
    /// Returns the record identifier: first present of `code`, `id`, `_id`.
    ///
    /// ```
    /// use foodlens::ProductRecord;
    ///
    /// let record = ProductRecord {
    ///     id: Some("42".to_string()),
    ///     storage_id: Some("abc".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.identifier(), Some("42"));
    /// ```
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        first_present(&[&self.code, &self.id, &self.storage_id])
    }

    /// Image shown on a grid card: small, then full, then thumbnail.
    #[must_use]
    pub fn grid_image(&self) -> Option<&str> {
        first_present(&[&self.image_small_url, &self.image_url, &self.image_thumb_url])
    }

    /// Image shown in the detail view: full, then front.
    #[must_use]
    pub fn detail_image(&self) -> Option<&str> {
        first_present(&[&self.image_url, &self.image_front_url])
    }

    /// Name with surrounding whitespace removed, `None` if absent.
    #[must_use]
    pub fn trimmed_name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim)
    }

    /// Looks up a single nutrient value per 100 g.
    #[must_use]
    pub fn nutrient(&self, key: &str) -> Option<f64> {
        self.nutriments.get(key).copied()
    }

    /// Energy per 100 g, preferring `energy_100g` over `energy-kcal_100g`.
    #[must_use]
    pub fn energy(&self) -> Option<f64> {
        self.nutrient("energy_100g")
            .or_else(|| self.nutrient("energy-kcal_100g"))
    }

    /// Splits a comma-joined field into trimmed, non-empty entries.
    ///
    /// ```
    /// use foodlens::ProductRecord;
    ///
    /// let parts = ProductRecord::split_list(Some("en:vegan, ,en:organic"));
    /// assert_eq!(parts, vec!["en:vegan", "en:organic"]);
    /// assert!(ProductRecord::split_list(None).is_empty());
    /// ```
    #[must_use]
    pub fn split_list(value: Option<&str>) -> Vec<&str> {
        value
            .map(|v| v.split(',').map(str::trim).filter(|p| !p.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// Returns the first non-empty value among the candidates, in order.
fn first_present<'a>(candidates: &[&'a Option<String>]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|v| !v.is_empty())
}

/// Normalizes a raw nutrition grade to a lowercase letter in `a..=e`.
///
/// The catalog also emits placeholders such as `"unknown"` or
/// `"not-applicable"`; those map to `None`.
#[must_use]
pub fn normalize_grade(raw: &str) -> Option<String> {
    let grade = raw.trim().to_ascii_lowercase();
    NUTRITION_GRADES.contains(&grade.as_str()).then_some(grade)
}

/// A catalog category as listed in the category index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category tag used in category URLs (`en:chocolates`).
    pub identifier: String,
    /// Human-readable name.
    pub display_name: String,
    /// Number of products the catalog files under this category.
    pub product_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_skips_empty_candidates() {
        let record = ProductRecord {
            code: Some(String::new()),
            id: None,
            storage_id: Some("_id-1".to_string()),
            ..Default::default()
        };
        assert_eq!(record.identifier(), Some("_id-1"));
    }

    #[test]
    fn image_resolvers_follow_their_own_precedence() {
        let record = ProductRecord {
            image_url: Some("full.jpg".to_string()),
            image_small_url: Some("small.jpg".to_string()),
            image_front_url: Some("front.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(record.grid_image(), Some("small.jpg"));
        assert_eq!(record.detail_image(), Some("full.jpg"));

        let thumb_only = ProductRecord {
            image_thumb_url: Some("thumb.jpg".to_string()),
            ..Default::default()
        };
        assert_eq!(thumb_only.grid_image(), Some("thumb.jpg"));
        assert_eq!(thumb_only.detail_image(), None);
    }

    #[test]
    fn energy_falls_back_to_kcal_key() {
        let mut record = ProductRecord::default();
        record.nutriments.insert("energy-kcal_100g".to_string(), 530.0);
        assert_eq!(record.energy(), Some(530.0));

        record.nutriments.insert("energy_100g".to_string(), 2218.0);
        assert_eq!(record.energy(), Some(2218.0));
    }

    #[test]
    fn grade_placeholders_are_not_grades() {
        assert_eq!(normalize_grade("B"), Some("b".to_string()));
        assert_eq!(normalize_grade(" e "), Some("e".to_string()));
        assert_eq!(normalize_grade("unknown"), None);
        assert_eq!(normalize_grade("not-applicable"), None);
        assert_eq!(normalize_grade(""), None);
    }
}
