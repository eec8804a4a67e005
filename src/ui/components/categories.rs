//! Category index listing.

use super::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CategoryMenu;

pub fn render_category_menu(canvas: &mut Canvas, menu: &CategoryMenu, theme: &Theme) {
    canvas.line(&format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)), "Categories");

    if menu.entries.is_empty() {
        let message = if menu.loading {
            "Loading categories..."
        } else {
            "No categories available. Type `categories` to retry."
        };
        canvas.line(&Theme::fg(&theme.colors.text_dim), message);
        return;
    }

    for (idx, entry) in menu.entries.iter().enumerate() {
        let marker = if menu.selected.as_deref() == Some(entry.identifier.as_str()) { '*' } else { ' ' };
        canvas.line(
            &Theme::fg(&theme.colors.text_normal),
            &format!("{marker}{:>3}. {} ({})", idx + 1, entry.label, entry.product_count),
        );
    }
}
