//! Display formatting shared by the view model and the renderer.
//!
//! Catalog taxonomy values arrive as slugs like `en:breakfast-cereals`; these
//! helpers turn them into labels, format nutrient amounts, and clip text to
//! a character budget without splitting UTF-8 sequences.

/// Maximum characters of a category label on a card.
pub const CATEGORY_LABEL_MAX: usize = 30;

/// Maximum characters of the ingredient snippet on a card.
pub const INGREDIENT_SNIPPET_MAX: usize = 80;

/// Maximum number of label tags shown in the detail view.
pub const DETAIL_LABELS_MAX: usize = 10;

/// Shown when a record has no categories.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Turns a taxonomy slug into a label: drops the `en:` prefix and
/// title-cases each hyphen-separated word.
///
/// ```
/// use foodlens::ui::helpers::format_tag;
///
/// assert_eq!(format_tag("en:no-gluten"), "No Gluten");
/// assert_eq!(format_tag("Organic"), "Organic");
/// ```
#[must_use]
pub fn format_tag(tag: &str) -> String {
    let tag = tag.trim();
    let tag = tag.strip_prefix("en:").unwrap_or(tag);

    tag.split('-').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Card label for a comma-joined category list: the first entry, formatted
/// with [`format_tag`] and clipped to [`CATEGORY_LABEL_MAX`] characters.
#[must_use]
pub fn format_category(categories: Option<&str>) -> String {
    match categories.map(str::trim) {
        None | Some("") => UNCATEGORIZED.to_string(),
        Some(list) => {
            let first = list.split(',').next().unwrap_or_default();
            take_chars(&format_tag(first), CATEGORY_LABEL_MAX).to_string()
        }
    }
}

/// Formats a per-100 g amount with one decimal, or `N/A` when absent.
///
/// ```
/// use foodlens::ui::helpers::format_nutrient;
///
/// assert_eq!(format_nutrient(Some(2.46), "g"), "2.5g");
/// assert_eq!(format_nutrient(None, " kcal"), "N/A");
/// ```
#[must_use]
pub fn format_nutrient(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}{unit}"))
}

/// First [`INGREDIENT_SNIPPET_MAX`] characters of an ingredient list, with
/// `...` appended when clipped.
#[must_use]
pub fn ingredient_snippet(text: &str) -> String {
    let clipped = take_chars(text, INGREDIENT_SNIPPET_MAX);
    if clipped.len() < text.len() {
        format!("{clipped}...")
    } else {
        clipped.to_string()
    }
}

/// Nutrition grade as shown on a badge, e.g. `Nutri-Score B`.
#[must_use]
pub fn grade_badge(grade: &str) -> String {
    format!("Nutri-Score {}", grade.to_uppercase())
}

/// Longest prefix of `text` with at most `max` characters.
#[must_use]
pub fn take_chars(text: &str, max: usize) -> &str {
    text.char_indices().nth(max).map_or(text, |(idx, _)| &text[..idx])
}

/// Clips `text` to `width` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return take_chars(text, width).to_string();
    }
    format!("{}...", take_chars(text, width - 3))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_uses_first_entry() {
        assert_eq!(
            format_category(Some("en:plant-based-foods-and-beverages, en:beverages")),
            "Plant Based Foods And Beverage"
        );
        assert_eq!(format_category(Some("Snacks,Sweet snacks")), "Snacks");
        assert_eq!(format_category(None), UNCATEGORIZED);
        assert_eq!(format_category(Some("  ")), UNCATEGORIZED);
    }

    #[test]
    fn snippet_is_clipped_at_eighty_characters() {
        let short = "Sugar, palm oil, hazelnuts";
        assert_eq!(ingredient_snippet(short), short);

        let long = "x".repeat(81);
        let snippet = ingredient_snippet(&long);
        assert_eq!(snippet.len(), 83);
        assert!(snippet.ends_with("..."));

        let exact = "y".repeat(80);
        assert_eq!(ingredient_snippet(&exact), exact);
    }

    #[test]
    fn clipping_respects_char_boundaries() {
        assert_eq!(take_chars("crème brûlée", 5), "crème");
        assert_eq!(truncate_to_width("crème brûlée", 8), "crème...");
        assert_eq!(truncate_to_width("tea", 8), "tea");
    }

    #[test]
    fn nutrients_and_badges() {
        assert_eq!(format_nutrient(Some(0.0), "g"), "0.0g");
        assert_eq!(format_nutrient(Some(539.0), " kcal"), "539.0 kcal");
        assert_eq!(grade_badge("c"), "Nutri-Score C");
    }
}
