//! Section renderers for the line-oriented terminal view.
//!
//! Every component appends styled lines to a [`Canvas`]. The renderer
//! decides which sections make up a frame.
//!
//! - [`header`]: title bar and query summary
//! - [`cards`]: numbered product cards and the load-more line
//! - [`detail`]: full record view
//! - [`categories`]: category index listing
//! - [`empty`]: empty-grid message
//! - [`footer`]: command hints

mod cards;
mod categories;
mod detail;
mod empty;
mod footer;
mod header;

pub use cards::{render_cards, render_load_more};
pub use categories::render_category_menu;
pub use detail::render_detail;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use header::render_header;

use crate::ui::theme::Theme;

/// Output buffer with a fixed line width.
#[derive(Debug, Clone)]
pub struct Canvas {
    buf: String,
    cols: usize,
}

impl Canvas {
    #[must_use]
    pub const fn new(cols: usize) -> Self {
        Self {
            buf: String::new(),
            cols,
        }
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Appends one line wrapped in `style` and a reset.
    pub fn line(&mut self, style: &str, text: &str) {
        self.buf.push_str(style);
        self.buf.push_str(text);
        self.buf.push_str(Theme::reset());
        self.buf.push('\n');
    }

    /// Appends a line with no styling.
    pub fn plain(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Appends `text` centered within the line width.
    pub fn centered(&mut self, style: &str, text: &str) {
        let width = text.chars().count();
        let padding = self.cols.saturating_sub(width) / 2;
        self.line(style, &format!("{}{text}", " ".repeat(padding)));
    }

    /// Appends a horizontal rule in `color`.
    pub fn rule(&mut self, color: &str) {
        self.line(&Theme::fg(color), &"─".repeat(self.cols));
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Colored `[Nutri-Score X]` badge, or an empty string for ungraded records.
pub(crate) fn badge(theme: &Theme, grade: Option<&str>, label: Option<&str>) -> String {
    label.map_or_else(String::new, |label| {
        format!(
            "{}{}[{label}]{}",
            Theme::bold(),
            Theme::fg(theme.grade_color(grade)),
            Theme::reset()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pads_by_characters() {
        let mut canvas = Canvas::new(10);
        canvas.centered("", "café");
        assert_eq!(canvas.finish(), format!("   café{}\n", Theme::reset()));
    }

    #[test]
    fn badge_is_empty_without_a_grade() {
        let theme = Theme::default();
        assert_eq!(badge(&theme, None, None), "");
        let shown = badge(&theme, Some("a"), Some("Nutri-Score A"));
        assert!(shown.contains("[Nutri-Score A]"));
        assert!(shown.contains(&Theme::fg(&theme.colors.grade_a)));
    }
}
