//! Pure client-side shaping of already-fetched catalog data.
//!
//! Sorting of product lists and trimming of the category index live here
//! because both are functions of a single response and do not depend on
//! session state.

use crate::domain::product::{CategorySummary, ProductRecord};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Categories must list more than this many products to be offered.
pub const CATEGORY_MIN_PRODUCTS: u64 = 100;

/// Maximum number of categories kept from the index.
pub const CATEGORY_LIMIT: usize = 50;

/// Placeholder grade for ungraded records under ascending grade sort.
const MISSING_GRADE_ASC: &str = "z";

/// Placeholder grade for ungraded records under descending grade sort.
const MISSING_GRADE_DESC: &str = "";

/// Client-side ordering applied to the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order.
    #[default]
    None,
    NameAsc,
    NameDesc,
    /// Best grade (`a`) first.
    GradeAsc,
    /// Worst grade (`e`) first.
    GradeDesc,
}

impl SortKey {
    /// All keys in menu order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::NameAsc,
        Self::NameDesc,
        Self::GradeAsc,
        Self::GradeDesc,
    ];

    /// Wire-style name (`name-asc`, ...); `None` is the empty string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::GradeAsc => "grade-asc",
            Self::GradeDesc => "grade-desc",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Default",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::GradeAsc => "Grade (Best First)",
            Self::GradeDesc => "Grade (Worst First)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" | "default" => Ok(Self::None),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "grade-asc" => Ok(Self::GradeAsc),
            "grade-desc" => Ok(Self::GradeDesc),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Returns a sorted copy of `records`.
///
/// The sort is stable, so ties keep their input order and applying the same
/// key twice yields the same sequence.
///
/// - Name keys compare [`ProductRecord::name`] with [`locale_compare`]; an
///   absent name compares as the empty string.
/// - `GradeAsc` treats an absent grade as `"z"`, `GradeDesc` treats it as `""`
///   and reverses the comparison. Both place ungraded records after graded
///   ones. Grades compare ordinally.
///
/// ```
/// use foodlens::gateway::{sort_records, SortKey};
/// use foodlens::ProductRecord;
///
/// let graded = ProductRecord { nutrition_grade: Some("a".into()), ..Default::default() };
/// let ungraded = ProductRecord::default();
///
/// let sorted = sort_records(&[ungraded.clone(), graded.clone()], SortKey::GradeAsc);
/// assert_eq!(sorted, vec![graded, ungraded]);
/// ```
#[must_use]
pub fn sort_records(records: &[ProductRecord], key: SortKey) -> Vec<ProductRecord> {
    let mut sorted = records.to_vec();

    match key {
        SortKey::None => {}
        SortKey::NameAsc => sorted.sort_by(|a, b| locale_compare(name_of(a), name_of(b))),
        SortKey::NameDesc => sorted.sort_by(|a, b| locale_compare(name_of(b), name_of(a))),
        SortKey::GradeAsc => sorted.sort_by(|a, b| {
            grade_of(a, MISSING_GRADE_ASC).cmp(grade_of(b, MISSING_GRADE_ASC))
        }),
        SortKey::GradeDesc => sorted.sort_by(|a, b| {
            grade_of(b, MISSING_GRADE_DESC).cmp(grade_of(a, MISSING_GRADE_DESC))
        }),
    }

    sorted
}

fn name_of(record: &ProductRecord) -> &str {
    record.name.as_deref().unwrap_or("")
}

fn grade_of<'a>(record: &'a ProductRecord, missing: &'a str) -> &'a str {
    record.nutrition_grade.as_deref().unwrap_or(missing)
}

/// Compares two display strings the way a user-facing collation would.
///
/// Primary order ignores accents and case, so `"Épinards"` sorts between
/// `"eclair"` and `"Fromage"`. Ties are broken by accents (unaccented
/// first), then by case (lowercase first).
#[must_use]
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = collation_key(a).cmp(collation_key(b));
    let accents = || {
        a.chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase))
    };

    primary.then_with(accents).then_with(|| b.cmp(a))
}

/// Base letters of `text`: decomposed, combining marks dropped, lowercased,
/// ligatures expanded.
fn collation_key(text: &str) -> impl Iterator<Item = char> + '_ {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .flat_map(|c| match c {
            'œ' => ['o', 'e'].into_iter().take(2),
            'æ' => ['a', 'e'].into_iter().take(2),
            'ß' => ['s', 's'].into_iter().take(2),
            _ => [c, c].into_iter().take(1),
        })
}

/// Trims the category index to the categories worth offering.
///
/// Keeps categories with more than [`CATEGORY_MIN_PRODUCTS`] products, orders
/// them by descending count (stable for equal counts) and truncates to
/// [`CATEGORY_LIMIT`].
#[must_use]
pub fn shape_categories(mut categories: Vec<CategorySummary>) -> Vec<CategorySummary> {
    categories.retain(|c| c.product_count > CATEGORY_MIN_PRODUCTS);
    categories.sort_by(|a, b| b.product_count.cmp(&a.product_count));
    categories.truncate(CATEGORY_LIMIT);
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: Option<&str>) -> ProductRecord {
        ProductRecord {
            name: name.map(String::from),
            ..Default::default()
        }
    }

    fn graded(code: &str, grade: Option<&str>) -> ProductRecord {
        ProductRecord {
            code: Some(code.to_string()),
            nutrition_grade: grade.map(String::from),
            ..Default::default()
        }
    }

    fn codes(records: &[ProductRecord]) -> Vec<&str> {
        records.iter().filter_map(ProductRecord::identifier).collect()
    }

    fn sample() -> Vec<ProductRecord> {
        vec![
            graded("1", Some("c")),
            graded("2", None),
            graded("3", Some("a")),
            graded("4", Some("e")),
            graded("5", Some("a")),
        ]
    }

    #[test]
    fn sorting_an_empty_batch_yields_empty() {
        for key in SortKey::ALL {
            assert!(sort_records(&[], key).is_empty());
        }
    }

    #[test]
    fn sorting_is_a_permutation_and_idempotent() {
        let input = sample();
        for key in SortKey::ALL {
            let once = sort_records(&input, key);
            assert_eq!(once.len(), input.len());
            for record in &input {
                assert_eq!(
                    once.iter().filter(|r| *r == record).count(),
                    input.iter().filter(|r| *r == record).count()
                );
            }
            assert_eq!(sort_records(&once, key), once);
        }
    }

    #[test]
    fn grade_ascending_puts_ungraded_last_and_keeps_ties_stable() {
        let sorted = sort_records(&sample(), SortKey::GradeAsc);
        assert_eq!(codes(&sorted), vec!["3", "5", "1", "4", "2"]);
    }

    #[test]
    fn grade_descending_treats_ungraded_as_lowest() {
        let sorted = sort_records(&sample(), SortKey::GradeDesc);
        assert_eq!(codes(&sorted), vec!["4", "1", "3", "5", "2"]);
    }

    #[test]
    fn name_sort_ignores_case_and_treats_missing_as_empty() {
        let input = vec![named(Some("banana")), named(None), named(Some("Apple")), named(Some("cherry"))];

        let asc = sort_records(&input, SortKey::NameAsc);
        let names: Vec<_> = asc.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("Apple"), Some("banana"), Some("cherry")]);

        let desc = sort_records(&input, SortKey::NameDesc);
        let names: Vec<_> = desc.iter().map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec![Some("cherry"), Some("banana"), Some("Apple"), None]);
    }

    #[test]
    fn name_sort_folds_accents_into_base_letters() {
        let input = vec![
            named(Some("Zucchini")),
            named(Some("Épinards")),
            named(Some("Fromage")),
            named(Some("eclair")),
            named(Some("Œufs frais")),
            named(Some("Orge")),
        ];

        let asc = sort_records(&input, SortKey::NameAsc);
        let names: Vec<_> = asc.iter().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["eclair", "Épinards", "Fromage", "Œufs frais", "Orge", "Zucchini"]);

        let desc = sort_records(&input, SortKey::NameDesc);
        let names: Vec<_> = desc.iter().filter_map(|r| r.name.as_deref()).collect();
        assert_eq!(names, vec!["Zucchini", "Orge", "Œufs frais", "Fromage", "Épinards", "eclair"]);
    }

    #[test]
    fn locale_compare_orders_unaccented_before_accented_on_ties() {
        assert_eq!(locale_compare("eclair", "éclair"), Ordering::Less);
        assert_eq!(locale_compare("Éclair", "eclair"), Ordering::Greater);
        assert_eq!(locale_compare("crème", "Creme"), Ordering::Greater);
    }

    #[test]
    fn locale_compare_puts_lowercase_first_on_case_ties() {
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn sort_key_round_trips_through_its_name() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert!("price-asc".parse::<SortKey>().is_err());
    }

    #[test]
    fn category_shaping_filters_sorts_and_truncates() {
        let mut categories: Vec<CategorySummary> = (0..80u64)
            .map(|i| CategorySummary {
                identifier: format!("en:c{i}"),
                display_name: format!("C{i}"),
                product_count: 50 + i * 10,
            })
            .collect();
        categories.push(CategorySummary {
            identifier: "en:edge".to_string(),
            display_name: "Edge".to_string(),
            product_count: 100,
        });

        let shaped = shape_categories(categories);
        assert_eq!(shaped.len(), CATEGORY_LIMIT);
        assert!(shaped.iter().all(|c| c.product_count > 100));
        assert!(shaped.windows(2).all(|w| w[0].product_count >= w[1].product_count));
        assert_eq!(shaped[0].identifier, "en:c79");
    }
}
