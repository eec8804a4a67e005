//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only code that mutates [`AppState`]. User commands
//! and fetch completions arrive as [`Event`]s; the handler applies the
//! transition and returns the [`Action`]s the runtime must perform.
//!
//! # Event Types
//!
//! - **Queries**: `Startup`, `Search`, `SearchByBarcode`, `SelectCategory`,
//!   `ResetToListing`, `ResetFilters`, `LoadMore`, `LoadCategories`
//! - **Local view changes**: `ChangeSort`, `SelectRecord`, `CloseDetail`,
//!   `ToggleTheme`
//! - **Lifecycle**: `Quit`
//! - **Worker**: `FetchCompleted`, checked against the pending ticket before
//!   anything is applied
//!
//! # Example
//!
//! ```
//! use foodlens::app::{handle_event, Action, AppState, Event};
//! use foodlens::ui::ThemeName;
//!
//! let mut state = AppState::new(24, ThemeName::Dark);
//! let (render, actions) = handle_event(&mut state, &Event::Search("oat milk".into()))?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! assert!(state.is_loading_initial);
//! # Ok::<(), foodlens::FoodlensError>(())
//! ```

use super::modes::{FetchPurpose, Query, LOAD_MORE_FAILED};
use super::state::LOAD_MORE_THRESHOLD;
use super::validity::filter_valid;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::product::ProductRecord;
use crate::gateway::shaping::SortKey;
use crate::worker::{FetchOutcome, FetchRequest, FetchResponse};

/// Events triggered by user commands or fetch completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Loads the default listing and the category index.
    Startup,
    /// Name search. A blank term returns to the listing.
    Search(String),
    /// Barcode lookup. A blank code returns to the listing.
    SearchByBarcode(String),
    /// Category filter. An empty identifier returns to the listing.
    SelectCategory(String),
    /// Re-sorts the current results without fetching.
    ChangeSort(SortKey),
    /// Requests the next page of the active query.
    LoadMore,
    ResetToListing,
    /// Clears the sort key, then returns to the listing.
    ResetFilters,
    /// Re-requests the category index.
    LoadCategories,
    /// Opens the detail view for a record.
    SelectRecord(ProductRecord),
    CloseDetail,
    /// Switches between the dark and light theme.
    ToggleTheme,
    Quit,
    /// A fetch finished; ignored unless its ticket is still current.
    FetchCompleted(FetchResponse),
}

impl Event {
    /// Variant name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Search(_) => "search",
            Self::SearchByBarcode(_) => "search_by_barcode",
            Self::SelectCategory(_) => "select_category",
            Self::ChangeSort(_) => "change_sort",
            Self::LoadMore => "load_more",
            Self::ResetToListing => "reset_to_listing",
            Self::ResetFilters => "reset_filters",
            Self::LoadCategories => "load_categories",
            Self::SelectRecord(_) => "select_record",
            Self::CloseDetail => "close_detail",
            Self::ToggleTheme => "toggle_theme",
            Self::Quit => "quit",
            Self::FetchCompleted(_) => "fetch_completed",
        }
    }
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// The boolean is `true` when the state changed in a way that needs a
/// re-render.
///
/// # Errors
///
/// Transitions themselves do not fail; the `Result` leaves room for
/// handlers that do.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Startup => {
            let mut actions = start_query(state, Query::Listing);
            actions.push(request_categories(state));
            Ok((true, actions))
        }
        Event::Search(term) => {
            let term = term.trim();
            state.sort_key = SortKey::None;
            if term.is_empty() {
                tracing::debug!("blank search term, returning to listing");
                return Ok((true, start_query(state, Query::Listing)));
            }
            Ok((true, start_query(state, Query::NameSearch(term.to_string()))))
        }
        Event::SearchByBarcode(code) => {
            let code = code.trim();
            state.sort_key = SortKey::None;
            if code.is_empty() {
                tracing::debug!("blank barcode, returning to listing");
                return Ok((true, start_query(state, Query::Listing)));
            }
            Ok((true, start_query(state, Query::Barcode(code.to_string()))))
        }
        Event::SelectCategory(category_id) => {
            let category_id = category_id.trim();
            if category_id.is_empty() {
                return Ok((true, start_query(state, Query::Listing)));
            }
            Ok((true, start_query(state, Query::Category(category_id.to_string()))))
        }
        Event::ChangeSort(key) => {
            tracing::debug!(sort_key = key.as_str(), results = state.result_set.len(), "changing sort");
            state.sort_key = *key;
            state.recompute_display();
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            if !state.can_load_more() {
                tracing::debug!(
                    has_more = state.has_more,
                    fetching = state.is_fetching(),
                    mode = %state.query.mode(),
                    "load more ignored"
                );
                return Ok((false, vec![]));
            }

            let page = state.page_cursor + 1;
            state.last_error = None;
            let ticket = state.begin_fetch(FetchPurpose::LoadMore { page });
            tracing::debug!(ticket = ticket, page = page, "requesting next page");

            Ok((true, vec![Action::Fetch(page_request(ticket, &state.query, page, state.page_size))]))
        }
        Event::ResetToListing => Ok((true, start_query(state, Query::Listing))),
        Event::ResetFilters => {
            state.sort_key = SortKey::None;
            Ok((true, start_query(state, Query::Listing)))
        }
        Event::LoadCategories => {
            if state.is_loading_categories {
                return Ok((false, vec![]));
            }
            Ok((true, vec![request_categories(state)]))
        }
        Event::SelectRecord(record) => {
            tracing::debug!(identifier = ?record.identifier(), "opening detail view");
            state.selected_record = Some(record.clone());
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            if state.selected_record.take().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggle();
            tracing::debug!(theme = %state.theme, "theme toggled");
            Ok((true, vec![Action::PersistTheme(state.theme)]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::FetchCompleted(response) => Ok(apply_completion(state, response)),
    }
}

/// Switches to `query` and issues its first page.
///
/// Results are cleared immediately, before the fetch resolves.
fn start_query(state: &mut AppState, query: Query) -> Vec<Action> {
    tracing::debug!(mode = %query.mode(), parameter = ?query.parameter(), "starting query");

    state.query = query;
    state.page_cursor = 1;
    state.has_more = false;
    state.last_error = None;
    state.clear_results();

    let ticket = state.begin_fetch(FetchPurpose::Initial);
    vec![Action::Fetch(page_request(ticket, &state.query, 1, state.page_size))]
}

fn request_categories(state: &mut AppState) -> Action {
    let ticket = state.begin_category_fetch();
    Action::Fetch(FetchRequest::categories(ticket))
}

/// Builds the request for one page of `query`. Barcode lookups ignore the page.
fn page_request(ticket: u64, query: &Query, page: u32, page_size: u32) -> FetchRequest {
    match query {
        Query::Listing => FetchRequest::listing(ticket, page, page_size),
        Query::NameSearch(term) => FetchRequest::name_search(ticket, term.clone(), page, page_size),
        Query::Barcode(code) => FetchRequest::barcode(ticket, code.clone()),
        Query::Category(category_id) => FetchRequest::category(ticket, category_id.clone(), page, page_size),
    }
}

fn apply_completion(state: &mut AppState, response: &FetchResponse) -> (bool, Vec<Action>) {
    if state.complete_category_fetch(response.ticket) {
        apply_categories(state, &response.outcome);
        return (true, vec![]);
    }

    let Some(purpose) = state.complete_fetch(response.ticket) else {
        tracing::debug!(
            ticket = response.ticket,
            pending_ticket = ?state.pending_fetch().map(|p| p.ticket),
            "discarding stale completion"
        );
        return (false, vec![]);
    };

    match purpose {
        FetchPurpose::Initial => apply_first_page(state, &response.outcome),
        FetchPurpose::LoadMore { page } => apply_next_page(state, page, &response.outcome),
    }

    (true, vec![])
}

fn apply_first_page(state: &mut AppState, outcome: &FetchOutcome) {
    let paginated = state.query.is_paginated();

    match outcome {
        FetchOutcome::Product(record) if !paginated => {
            tracing::debug!(identifier = ?record.identifier(), "barcode lookup hit");
            state.result_set = vec![record.clone()];
            state.has_more = false;
        }
        FetchOutcome::Products(batch) if paginated => {
            let valid = filter_valid(batch.clone());
            state.has_more = valid.len() == state.page_size as usize;
            tracing::debug!(
                received = batch.len(),
                valid = valid.len(),
                has_more = state.has_more,
                "first page applied"
            );
            state.result_set = valid;
        }
        other => {
            log_failure(state, other);
            state.clear_results();
            state.has_more = false;
            state.last_error = Some(state.query.failure_message().to_string());
        }
    }

    state.recompute_display();
}

fn apply_next_page(state: &mut AppState, page: u32, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Products(batch) => {
            let valid = filter_valid(batch.clone());
            if valid.is_empty() {
                tracing::debug!(page = page, received = batch.len(), "next page had no valid records");
                state.has_more = false;
                return;
            }

            let count = valid.len();
            state.result_set.extend(valid);
            state.page_cursor = page;
            state.has_more = count >= LOAD_MORE_THRESHOLD;
            state.recompute_display();

            tracing::debug!(
                page = page,
                valid = count,
                total = state.result_set.len(),
                has_more = state.has_more,
                "next page appended"
            );
        }
        other => {
            log_failure(state, other);
            state.last_error = Some(LOAD_MORE_FAILED.to_string());
        }
    }
}

fn apply_categories(state: &mut AppState, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Categories(categories) => {
            tracing::debug!(count = categories.len(), "category index loaded");
            state.categories.clone_from(categories);
        }
        FetchOutcome::Failed(failure) => {
            tracing::warn!(kind = ?failure.kind, error = %failure.message, "category index fetch failed");
        }
        _ => tracing::warn!("unexpected outcome for category index fetch"),
    }
}

fn log_failure(state: &AppState, outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Failed(failure) => tracing::warn!(
            mode = %state.query.mode(),
            kind = ?failure.kind,
            error = %failure.message,
            "fetch failed"
        ),
        _ => tracing::warn!(mode = %state.query.mode(), "unexpected fetch outcome"),
    }
}
