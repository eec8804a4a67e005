//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings only; every decision about
//! what to show has already been made.

use crate::ui::theme::ThemeName;

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Loading indicator text while a page-1 fetch is in flight.
    pub status: Option<String>,

    /// Error banner text.
    pub error: Option<String>,

    /// Cards in display order, numbered from 1.
    pub cards: Vec<ProductCard>,

    /// Shown instead of cards when there is nothing to show.
    pub empty_state: Option<EmptyState>,

    pub load_more: LoadMoreState,

    /// Detail overlay for the selected record.
    pub detail: Option<DetailView>,

    /// Category index for the category picker.
    pub categories: CategoryMenu,

    pub footer: FooterInfo,

    pub theme: ThemeName,
}

/// Title bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Active query, e.g. `Search: "oat milk"`.
    pub query: String,
    /// Active sort label, `None` when the catalog order is kept.
    pub sort: Option<String>,
    pub result_count: usize,
}

/// One grid card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// 1-based position, used by `show N`.
    pub position: usize,
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    /// Lowercase grade letter, used for the badge color.
    pub grade: Option<String>,
    pub grade_label: Option<String>,
    pub ingredients: Option<String>,
    pub image: Option<String>,
}

/// Footer of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreState {
    /// No grid, or a barcode result.
    Hidden,
    Available,
    Loading,
    /// No further pages.
    Exhausted,
}

/// Empty grid message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Full record view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub name: String,
    pub brands: Option<String>,
    pub quantity: Option<String>,
    pub image: Option<String>,
    pub grade: Option<String>,
    pub grade_label: Option<String>,
    pub ingredients: String,
    pub nutrients: Vec<NutrientRow>,
    pub labels: Vec<String>,
    pub allergens: Vec<String>,
    pub packaging: Option<String>,
    pub countries: Option<String>,
}

/// One row of the per-100 g nutrient table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutrientRow {
    pub label: &'static str,
    pub value: String,
}

/// Category picker content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMenu {
    pub loading: bool,
    /// Identifier of the active category, if any.
    pub selected: Option<String>,
    pub entries: Vec<CategoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub identifier: String,
    pub label: String,
    pub product_count: u64,
}

/// Command hint line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
