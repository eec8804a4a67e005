//! Record validity filter applied to fetched batches.
//!
//! The catalog returns many half-filled entries. Only records that can be
//! shown meaningfully on a card survive; the rest are dropped without telling
//! the user.

use crate::domain::product::ProductRecord;

/// Trimmed names of this length or shorter are rejected.
const MIN_NAME_LEN: usize = 2;

/// Placeholder names the catalog uses for unnamed products.
const PLACEHOLDER_NAMES: [&str; 2] = ["unknown", "unknown product"];

/// Returns whether a record is fit for display.
///
/// A record is valid when all of the following hold:
/// - its name, trimmed, is longer than two characters and is not a
///   placeholder such as `"Unknown Product"`
/// - it has an identifier
/// - it has a main image, categories or brands
///
/// ```
/// use foodlens::app::validity::is_valid_record;
/// use foodlens::ProductRecord;
///
/// let record = ProductRecord {
///     code: Some("3017620422003".into()),
///     name: Some("Nutella".into()),
///     brands: Some("Ferrero".into()),
///     ..Default::default()
/// };
/// assert!(is_valid_record(&record));
///
/// let unnamed = ProductRecord { name: Some(" unknown ".into()), ..record };
/// assert!(!is_valid_record(&unnamed));
/// ```
#[must_use]
pub fn is_valid_record(record: &ProductRecord) -> bool {
    let Some(name) = record.trimmed_name() else {
        return false;
    };

    if name.chars().count() <= MIN_NAME_LEN {
        return false;
    }

    let lowered = name.to_lowercase();
    if PLACEHOLDER_NAMES.contains(&lowered.as_str()) {
        return false;
    }

    if record.identifier().is_none() {
        return false;
    }

    [&record.image_url, &record.categories, &record.brands]
        .iter()
        .any(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
}

/// Keeps the valid records of a batch, preserving order.
#[must_use]
pub fn filter_valid(batch: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let total = batch.len();
    let valid: Vec<ProductRecord> = batch.into_iter().filter(is_valid_record).collect();

    if valid.len() != total {
        tracing::debug!(
            total = total,
            kept = valid.len(),
            dropped = total - valid.len(),
            "dropped invalid records"
        );
    }

    valid
}
