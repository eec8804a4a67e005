//! Frame assembly.
//!
//! A frame is the header, an optional error banner or loading line, then
//! either the detail view, the empty-state message, or the card grid with
//! its load-more line, and finally the command hints.

use crate::ui::components::{self, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CategoryMenu, UIViewModel};
use std::io::Write;

/// Renders a full frame to a string.
#[must_use]
pub fn render_to_string(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut canvas = Canvas::new(cols);

    components::render_header(&mut canvas, &vm.header, theme);

    if let Some(error) = &vm.error {
        canvas.line(&format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.error_fg)), &format!("! {error}"));
    }
    if let Some(status) = &vm.status {
        canvas.line(&Theme::fg(&theme.colors.accent), status);
    }

    if let Some(detail) = &vm.detail {
        components::render_detail(&mut canvas, detail, theme);
    } else if let Some(empty) = &vm.empty_state {
        components::render_empty_state(&mut canvas, empty, theme);
    } else {
        components::render_cards(&mut canvas, &vm.cards, theme);
        components::render_load_more(&mut canvas, vm.load_more, theme);
    }

    components::render_footer(&mut canvas, &vm.footer, theme);
    canvas.finish()
}

/// Renders the category index on its own.
#[must_use]
pub fn render_categories_to_string(menu: &CategoryMenu, theme: &Theme, cols: usize) -> String {
    let mut canvas = Canvas::new(cols);
    components::render_category_menu(&mut canvas, menu, theme);
    canvas.finish()
}

/// Writes a frame to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn render(vm: &UIViewModel, theme: &Theme, cols: usize) -> std::io::Result<()> {
    let frame = render_to_string(vm, theme, cols);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(frame.as_bytes())?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::domain::product::{CategorySummary, ProductRecord};
    use crate::ui::theme::ThemeName;

    fn record(code: &str, name: &str, grade: Option<&str>) -> ProductRecord {
        ProductRecord {
            code: Some(code.to_string()),
            name: Some(name.to_string()),
            brands: Some("Acme".to_string()),
            categories: Some("en:breakfast-cereals".to_string()),
            ingredients_text: Some("oats, sugar".to_string()),
            image_url: Some(format!("https://img/{code}.jpg")),
            nutrition_grade: grade.map(String::from),
            ..ProductRecord::default()
        }
    }

    fn state_with(records: Vec<ProductRecord>) -> AppState {
        let mut state = AppState::new(24, ThemeName::Dark);
        state.result_set = records;
        state.recompute_display();
        state
    }

    #[test]
    fn grid_frame_lists_numbered_cards() {
        let state = state_with(vec![record("1", "Granola", Some("a")), record("2", "Muesli", None)]);
        let frame = render_to_string(&state.compute_viewmodel(), &Theme::from_name(state.theme), 80);

        assert!(frame.contains("1.") && frame.contains("Granola"));
        assert!(frame.contains("[Nutri-Score A]"));
        assert!(frame.contains("Muesli"));
        assert!(frame.contains("Breakfast Cereals"));
        assert!(frame.contains("2 products"));
    }

    #[test]
    fn empty_frame_shows_message_instead_of_cards() {
        let state = state_with(Vec::new());
        let frame = render_to_string(&state.compute_viewmodel(), &Theme::default(), 80);
        assert!(frame.contains("No Products Found"));
    }

    #[test]
    fn detail_replaces_the_grid() {
        let mut state = state_with(vec![record("1", "Granola", Some("b")), record("2", "Muesli", None)]);
        state.selected_record = Some(state.display_set[0].clone());

        let frame = render_to_string(&state.compute_viewmodel(), &Theme::default(), 80);
        assert!(frame.contains("Nutrition facts"));
        assert!(frame.contains("oats, sugar"));
        assert!(!frame.contains("Muesli"));
    }

    #[test]
    fn error_banner_is_rendered() {
        let mut state = state_with(Vec::new());
        state.last_error = Some("Failed to load products.".to_string());
        let frame = render_to_string(&state.compute_viewmodel(), &Theme::default(), 80);
        assert!(frame.contains("! Failed to load products."));
    }

    #[test]
    fn category_listing_marks_selection() {
        let mut state = state_with(Vec::new());
        state.categories = vec![
            CategorySummary {
                identifier: "en:snacks".to_string(),
                display_name: "Snacks".to_string(),
                product_count: 5000,
            },
            CategorySummary {
                identifier: "en:beverages".to_string(),
                display_name: "Beverages".to_string(),
                product_count: 4000,
            },
        ];
        state.query = crate::app::Query::Category("en:beverages".to_string());

        let listing = render_categories_to_string(&state.compute_viewmodel().categories, &Theme::default(), 80);
        assert!(listing.contains("   1. Snacks (5000)"));
        assert!(listing.contains("*  2. Beverages (4000)"));
    }
}
