//! Title bar and query summary.

use super::Canvas;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

pub fn render_header(canvas: &mut Canvas, header: &HeaderInfo, theme: &Theme) {
    let mut title_style = format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        title_style.push_str(&Theme::bg(bg));
    }
    canvas.centered(&title_style, &header.title);

    let noun = if header.result_count == 1 { "product" } else { "products" };
    let mut summary = format!("{}  |  {} {noun}", header.query, header.result_count);
    if let Some(sort) = &header.sort {
        summary.push_str("  |  Sort: ");
        summary.push_str(sort);
    }
    canvas.line(&Theme::fg(&theme.colors.text_dim), &summary);
    canvas.rule(&theme.colors.border);
}
