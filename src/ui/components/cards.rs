//! Numbered product cards.

use super::{badge, Canvas};
use crate::ui::helpers::truncate_to_width;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LoadMoreState, ProductCard};

/// Left margin of the lines under a card title.
const INDENT: &str = "     ";

pub fn render_cards(canvas: &mut Canvas, cards: &[ProductCard], theme: &Theme) {
    for card in cards {
        render_card(canvas, card, theme);
    }
}

fn render_card(canvas: &mut Canvas, card: &ProductCard, theme: &Theme) {
    let text_width = canvas.cols().saturating_sub(INDENT.len());
    let badge = badge(theme, card.grade.as_deref(), card.grade_label.as_deref());

    let title = format!(
        "{}{:>3}.{} {}{}{}",
        Theme::fg(&theme.colors.accent),
        card.position,
        Theme::reset(),
        Theme::bold(),
        truncate_to_width(&card.name, text_width),
        Theme::reset(),
    );
    if badge.is_empty() {
        canvas.plain(&title);
    } else {
        canvas.plain(&format!("{title} {badge}"));
    }

    let byline = card.brand.as_deref().map_or_else(
        || card.category.clone(),
        |brand| format!("{brand}  |  {}", card.category),
    );
    canvas.line(
        &Theme::fg(&theme.colors.text_dim),
        &format!("{INDENT}{}", truncate_to_width(&byline, text_width)),
    );

    if let Some(ingredients) = &card.ingredients {
        canvas.line(
            &Theme::fg(&theme.colors.text_normal),
            &format!("{INDENT}{}", truncate_to_width(ingredients, text_width)),
        );
    }
}

/// Line under the grid describing whether more pages can be fetched.
pub fn render_load_more(canvas: &mut Canvas, state: LoadMoreState, theme: &Theme) {
    match state {
        LoadMoreState::Hidden => {}
        LoadMoreState::Available => {
            canvas.centered(&Theme::fg(&theme.colors.accent), "Type `more` to load more products");
        }
        LoadMoreState::Loading => {
            canvas.centered(&Theme::fg(&theme.colors.text_dim), "Loading more products...");
        }
        LoadMoreState::Exhausted => {
            canvas.centered(&Theme::fg(&theme.colors.text_dim), "No more products");
        }
    }
}
