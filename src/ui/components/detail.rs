//! Full record view shown by `show <n>`.

use super::{badge, Canvas};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailView;

const LABEL_WIDTH: usize = 16;

pub fn render_detail(canvas: &mut Canvas, detail: &DetailView, theme: &Theme) {
    let badge = badge(theme, detail.grade.as_deref(), detail.grade_label.as_deref());
    let title = format!("{}{}{}", Theme::bold(), detail.name, Theme::reset());
    if badge.is_empty() {
        canvas.plain(&title);
    } else {
        canvas.plain(&format!("{title} {badge}"));
    }

    let dim = Theme::fg(&theme.colors.text_dim);
    for (label, value) in [
        ("Brand", &detail.brands),
        ("Quantity", &detail.quantity),
        ("Image", &detail.image),
    ] {
        if let Some(value) = value {
            canvas.line(&dim, &format!("{label:<LABEL_WIDTH$}{value}"));
        }
    }

    section(canvas, theme, "Ingredients");
    canvas.line(&Theme::fg(&theme.colors.text_normal), &detail.ingredients);

    section(canvas, theme, "Nutrition facts (per 100 g)");
    for row in &detail.nutrients {
        canvas.line(
            &Theme::fg(&theme.colors.text_normal),
            &format!("  {:<LABEL_WIDTH$}{}", row.label, row.value),
        );
    }

    if !detail.labels.is_empty() {
        section(canvas, theme, "Labels");
        canvas.line(&Theme::fg(&theme.colors.text_normal), &detail.labels.join(", "));
    }
    if !detail.allergens.is_empty() {
        section(canvas, theme, "Allergens");
        canvas.line(&Theme::fg(&theme.colors.error_fg), &detail.allergens.join(", "));
    }

    for (label, value) in [("Packaging", &detail.packaging), ("Countries", &detail.countries)] {
        if let Some(value) = value {
            section(canvas, theme, label);
            canvas.line(&Theme::fg(&theme.colors.text_normal), value);
        }
    }
}

fn section(canvas: &mut Canvas, theme: &Theme, title: &str) {
    canvas.blank();
    canvas.line(&format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent)), title);
}
