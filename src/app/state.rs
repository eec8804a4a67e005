//! Session state and view model computation.
//!
//! [`AppState`] is the single source of truth for the browsing session: the
//! fetched results, the sorted view of them, the active query, pagination,
//! loading flags and the pending-fetch bookkeeping that lets stale
//! completions be recognized and dropped.
//!
//! # State Components
//!
//! - **Result set**: accumulated valid records for the active query
//! - **Display set**: the result set under the active sort key
//! - **Query**: mode plus parameter, exactly one active
//! - **Pagination**: page cursor and `has_more`
//! - **Pending fetches**: ticket and purpose of the latest result-set fetch,
//!   and the ticket of the latest category index fetch

use super::modes::{FetchPurpose, Query};
use crate::domain::product::{CategorySummary, ProductRecord};
use crate::gateway::shaping::{sort_records, SortKey};
use crate::ui::helpers::{
    format_category, format_nutrient, format_tag, grade_badge, ingredient_snippet, DETAIL_LABELS_MAX,
};
use crate::ui::theme::ThemeName;
use crate::ui::viewmodel::{
    CategoryEntry, CategoryMenu, DetailView, EmptyState, FooterInfo, HeaderInfo, LoadMoreState, NutrientRow,
    ProductCard, UIViewModel,
};

/// Records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 24;

/// A load-more batch with at least this many valid records keeps
/// pagination open. Page 1 uses the stricter `valid == page_size` rule.
pub const LOAD_MORE_THRESHOLD: usize = 20;

const APP_TITLE: &str = "foodlens";

/// A result-set fetch that has been issued and not yet completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    pub ticket: u64,
    pub purpose: FetchPurpose,
}

/// Central session state.
///
/// Mutated only by [`handle_event`](super::handle_event).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Valid records fetched for the active query, in fetch order.
    pub result_set: Vec<ProductRecord>,

    /// `result_set` ordered by `sort_key`. Recomputed by
    /// [`recompute_display`](Self::recompute_display) whenever either changes.
    pub display_set: Vec<ProductRecord>,

    pub query: Query,
    pub sort_key: SortKey,

    /// Last page merged into `result_set`, starting at 1.
    pub page_cursor: u32,
    pub has_more: bool,

    /// A page-1 (or barcode) fetch is in flight.
    pub is_loading_initial: bool,
    /// A load-more fetch is in flight.
    pub is_loading_more: bool,
    pub is_loading_categories: bool,

    /// User-facing message of the last failed action.
    pub last_error: Option<String>,

    /// Record shown in the detail view.
    pub selected_record: Option<ProductRecord>,

    /// Shaped category index.
    pub categories: Vec<CategorySummary>,

    pub theme: ThemeName,
    pub page_size: u32,

    next_ticket: u64,
    pending: Option<PendingFetch>,
    pending_categories: Option<u64>,
}

impl AppState {
    /// Creates an idle session: listing mode, no results, nothing in flight.
    #[must_use]
    pub const fn new(page_size: u32, theme: ThemeName) -> Self {
        Self {
            result_set: Vec::new(),
            display_set: Vec::new(),
            query: Query::Listing,
            sort_key: SortKey::None,
            page_cursor: 1,
            has_more: false,
            is_loading_initial: false,
            is_loading_more: false,
            is_loading_categories: false,
            last_error: None,
            selected_record: None,
            categories: Vec::new(),
            theme,
            page_size,
            next_ticket: 0,
            pending: None,
            pending_categories: None,
        }
    }

    /// Rebuilds `display_set` from `result_set` under the current sort key.
    pub fn recompute_display(&mut self) {
        self.display_set = sort_records(&self.result_set, self.sort_key);
    }

    /// Empties both the result and display sets.
    pub fn clear_results(&mut self) {
        self.result_set.clear();
        self.display_set.clear();
    }

    fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    /// Registers a new result-set fetch and returns its ticket.
    ///
    /// Supersedes any fetch still pending; that fetch's completion will be
    /// discarded.
    pub fn begin_fetch(&mut self, purpose: FetchPurpose) -> u64 {
        let ticket = self.issue_ticket();

        if let Some(superseded) = self.pending.replace(PendingFetch { ticket, purpose }) {
            tracing::debug!(superseded_ticket = superseded.ticket, ticket = ticket, "superseding pending fetch");
        }

        self.is_loading_initial = purpose == FetchPurpose::Initial;
        self.is_loading_more = !self.is_loading_initial;
        ticket
    }

    /// Registers a new category index fetch and returns its ticket.
    pub fn begin_category_fetch(&mut self) -> u64 {
        let ticket = self.issue_ticket();
        self.pending_categories = Some(ticket);
        self.is_loading_categories = true;
        ticket
    }

    /// Claims the pending result-set fetch if `ticket` is current.
    ///
    /// Returns its purpose and clears the result-set loading flags, or
    /// returns `None` and changes nothing when the ticket is stale.
    pub fn complete_fetch(&mut self, ticket: u64) -> Option<FetchPurpose> {
        let pending = self.pending.filter(|p| p.ticket == ticket)?;
        self.pending = None;
        self.is_loading_initial = false;
        self.is_loading_more = false;
        Some(pending.purpose)
    }

    /// Claims the pending category fetch if `ticket` is current.
    pub fn complete_category_fetch(&mut self, ticket: u64) -> bool {
        if self.pending_categories != Some(ticket) {
            return false;
        }
        self.pending_categories = None;
        self.is_loading_categories = false;
        true
    }

    #[must_use]
    pub const fn pending_fetch(&self) -> Option<PendingFetch> {
        self.pending
    }

    /// Whether a result-set fetch is in flight.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a load-more request would be honored right now.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.has_more && !self.is_fetching() && self.query.is_paginated()
    }

    /// Display name of a category, falling back to a formatted identifier.
    #[must_use]
    pub fn category_label(&self, identifier: &str) -> String {
        self.categories
            .iter()
            .find(|c| c.identifier == identifier)
            .map_or_else(|| format_tag(identifier), |c| c.display_name.clone())
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let cards: Vec<ProductCard> = self
            .display_set
            .iter()
            .enumerate()
            .map(|(idx, record)| Self::compute_card(idx + 1, record))
            .collect();

        let empty_state = (cards.is_empty() && !self.is_loading_initial).then(|| EmptyState {
            message: "No Products Found".to_string(),
            subtitle: "We couldn't find any products matching your search. Try adjusting your filters or search terms."
                .to_string(),
        });

        UIViewModel {
            header: self.compute_header(),
            status: self.compute_status(),
            error: self.last_error.clone(),
            load_more: self.compute_load_more(cards.is_empty()),
            cards,
            empty_state,
            detail: self.selected_record.as_ref().map(Self::compute_detail),
            categories: self.compute_category_menu(),
            footer: self.compute_footer(),
            theme: self.theme,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let query = match &self.query {
            Query::Listing => "All products".to_string(),
            Query::NameSearch(term) => format!("Search: \"{term}\""),
            Query::Barcode(code) => format!("Barcode: {code}"),
            Query::Category(id) => format!("Category: {}", self.category_label(id)),
        };

        HeaderInfo {
            title: APP_TITLE.to_string(),
            query,
            sort: (self.sort_key != SortKey::None).then(|| self.sort_key.label().to_string()),
            result_count: self.display_set.len(),
        }
    }

    fn compute_status(&self) -> Option<String> {
        if !self.is_loading_initial {
            return None;
        }
        Some(match self.query {
            Query::Barcode(_) => "Looking up barcode...".to_string(),
            _ => "Loading products...".to_string(),
        })
    }

    fn compute_load_more(&self, grid_empty: bool) -> LoadMoreState {
        if grid_empty || !self.query.is_paginated() {
            LoadMoreState::Hidden
        } else if self.is_loading_more {
            LoadMoreState::Loading
        } else if self.has_more {
            LoadMoreState::Available
        } else {
            LoadMoreState::Exhausted
        }
    }

    fn compute_card(position: usize, record: &ProductRecord) -> ProductCard {
        ProductCard {
            position,
            name: display_name(record),
            brand: record.brands.clone(),
            category: format_category(record.categories.as_deref()),
            grade: record.nutrition_grade.clone(),
            grade_label: record.nutrition_grade.as_deref().map(grade_badge),
            ingredients: record.ingredients_text.as_deref().map(ingredient_snippet),
            image: record.grid_image().map(String::from),
        }
    }

    fn compute_detail(record: &ProductRecord) -> DetailView {
        let nutrient = |label: &'static str, key: &str| NutrientRow {
            label,
            value: format_nutrient(record.nutrient(key), "g"),
        };

        let nutrients = vec![
            NutrientRow {
                label: "Energy",
                value: format_nutrient(record.energy(), " kcal"),
            },
            nutrient("Fat", "fat_100g"),
            nutrient("Saturated Fat", "saturated-fat_100g"),
            nutrient("Carbohydrates", "carbohydrates_100g"),
            nutrient("Sugars", "sugars_100g"),
            nutrient("Fiber", "fiber_100g"),
            nutrient("Proteins", "proteins_100g"),
            nutrient("Salt", "salt_100g"),
        ];

        DetailView {
            name: display_name(record),
            brands: record.brands.clone(),
            quantity: record.quantity.clone(),
            image: record.detail_image().map(String::from),
            grade: record.nutrition_grade.clone(),
            grade_label: record.nutrition_grade.as_deref().map(grade_badge),
            ingredients: record
                .ingredients_text
                .clone()
                .unwrap_or_else(|| "No ingredient information available".to_string()),
            nutrients,
            labels: ProductRecord::split_list(record.labels.as_deref())
                .into_iter()
                .take(DETAIL_LABELS_MAX)
                .map(format_tag)
                .collect(),
            allergens: ProductRecord::split_list(record.allergens.as_deref())
                .into_iter()
                .map(format_tag)
                .collect(),
            packaging: record.packaging.clone(),
            countries: record.countries.clone(),
        }
    }

    fn compute_category_menu(&self) -> CategoryMenu {
        CategoryMenu {
            loading: self.is_loading_categories,
            selected: match &self.query {
                Query::Category(id) => Some(id.clone()),
                _ => None,
            },
            entries: self
                .categories
                .iter()
                .map(|c| CategoryEntry {
                    identifier: c.identifier.clone(),
                    label: c.display_name.clone(),
                    product_count: c.product_count,
                })
                .collect(),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selected_record.is_some() {
            "close: back to results  theme: toggle theme  quit: exit"
        } else if self.can_load_more() {
            "search <term>  barcode <code>  category <id>  sort <key>  more  show <n>  reset  help"
        } else {
            "search <term>  barcode <code>  category <id>  sort <key>  show <n>  reset  help"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

fn display_name(record: &ProductRecord) -> String {
    record
        .trimmed_name()
        .filter(|n| !n.is_empty())
        .unwrap_or("Unknown Product")
        .to_string()
}
