//! Message shown when the grid has no cards.

use super::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

pub fn render_empty_state(canvas: &mut Canvas, empty: &EmptyState, theme: &Theme) {
    canvas.blank();
    canvas.centered(&format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal)), &empty.message);
    canvas.centered(&format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)), &empty.subtitle);
    canvas.blank();
}
