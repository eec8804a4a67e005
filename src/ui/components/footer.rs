//! Command hint line.

use super::Canvas;
use crate::ui::helpers::truncate_to_width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(canvas: &mut Canvas, footer: &FooterInfo, theme: &Theme) {
    canvas.rule(&theme.colors.border);
    let hint = truncate_to_width(&footer.keybindings, canvas.cols());
    canvas.centered(&Theme::fg(&theme.colors.text_dim), &hint);
}
