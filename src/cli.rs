//! Interactive command language.
//!
//! Each input line is parsed into a [`Command`], then resolved against the
//! current [`AppState`] into a [`Step`] for the runtime. Resolution needs the
//! state because `show 3` and `category 2` refer to positions in what the
//! user is currently looking at.

use crate::app::{AppState, Event};
use crate::gateway::SortKey;

/// Printed by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  search <term>      search products by name (s)
  barcode <code>     look up a single barcode (b)
  category <id|n>    filter by category identifier or list position (c)
  categories         list popular categories
  sort <key>         none, name-asc, name-desc, grade-asc, grade-desc
  more               load the next page (m)
  show <n>           open the detail view for card n
  close              leave the detail view
  reset              back to the full listing
  clear-filters      clear sort and filters (clear)
  theme              toggle dark/light theme
  help               this text (?)
  quit               exit (q)";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Barcode(String),
    Category(String),
    Categories,
    Sort(SortKey),
    More,
    Show(usize),
    Close,
    Reset,
    ClearFilters,
    Theme,
    Help,
    Quit,
    /// Empty line; redraws the current frame.
    Redraw,
}

/// What the runtime should do for a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Dispatch(Event),
    /// Print the category index, dispatching `fetch` first if it is set.
    ShowCategories { fetch: Option<Event> },
    Help,
    Redraw,
    /// Message for the user; nothing changes.
    Notice(String),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns a message for unknown commands and malformed arguments.
///
/// # Examples
///
/// ```
/// use foodlens::cli::{parse_command, Command};
/// use foodlens::gateway::SortKey;
///
/// assert_eq!(parse_command("s  oat milk ").unwrap(), Command::Search("oat milk".into()));
/// assert_eq!(parse_command("sort grade-asc").unwrap(), Command::Sort(SortKey::GradeAsc));
/// assert!(parse_command("show zero").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => Command::Redraw,
        "search" | "s" => Command::Search(rest.to_string()),
        "barcode" | "b" => Command::Barcode(rest.to_string()),
        "category" | "c" => Command::Category(rest.to_string()),
        "categories" | "cats" => Command::Categories,
        "sort" => Command::Sort(rest.parse()?),
        "more" | "m" => Command::More,
        "show" => {
            let position = rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("show expects a card number, got `{rest}`"))?;
            Command::Show(position)
        }
        "close" | "back" => Command::Close,
        "reset" => Command::Reset,
        "clear" | "clear-filters" => Command::ClearFilters,
        "theme" => Command::Theme,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`, type `help` for a list")),
    };
    Ok(command)
}

/// Resolves a command against the current state.
pub fn resolve(command: Command, state: &AppState) -> Step {
    match command {
        Command::Search(term) => Step::Dispatch(Event::Search(term)),
        Command::Barcode(code) => Step::Dispatch(Event::SearchByBarcode(code)),
        Command::Category(arg) => {
            let by_position = arg
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| state.categories.get(idx));
            match by_position {
                Some(category) => Step::Dispatch(Event::SelectCategory(category.identifier.clone())),
                None => Step::Dispatch(Event::SelectCategory(arg)),
            }
        }
        Command::Categories => {
            let fetch = (state.categories.is_empty() && !state.is_loading_categories).then_some(Event::LoadCategories);
            Step::ShowCategories { fetch }
        }
        Command::Sort(key) => Step::Dispatch(Event::ChangeSort(key)),
        Command::More => Step::Dispatch(Event::LoadMore),
        Command::Show(position) => match position.checked_sub(1).and_then(|idx| state.display_set.get(idx)) {
            Some(record) => Step::Dispatch(Event::SelectRecord(record.clone())),
            None => Step::Notice(format!("No product #{position} in the current results.")),
        },
        Command::Close => Step::Dispatch(Event::CloseDetail),
        Command::Reset => Step::Dispatch(Event::ResetToListing),
        Command::ClearFilters => Step::Dispatch(Event::ResetFilters),
        Command::Theme => Step::Dispatch(Event::ToggleTheme),
        Command::Help => Step::Help,
        Command::Quit => Step::Dispatch(Event::Quit),
        Command::Redraw => Step::Redraw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{CategorySummary, ProductRecord};
    use crate::ui::ThemeName;

    fn state() -> AppState {
        let mut state = AppState::new(24, ThemeName::Dark);
        state.display_set = vec![ProductRecord {
            code: Some("3017620422003".to_string()),
            name: Some("Nutella".to_string()),
            ..ProductRecord::default()
        }];
        state.categories = vec![CategorySummary {
            identifier: "en:snacks".to_string(),
            display_name: "Snacks".to_string(),
            product_count: 5000,
        }];
        state
    }

    #[test]
    fn parses_verbs_and_aliases() {
        assert_eq!(parse_command("").unwrap(), Command::Redraw);
        assert_eq!(parse_command("barcode 3017620422003").unwrap(), Command::Barcode("3017620422003".into()));
        assert_eq!(parse_command("SEARCH Greek Yogurt").unwrap(), Command::Search("Greek Yogurt".into()));
        assert_eq!(parse_command("search").unwrap(), Command::Search(String::new()));
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("sort").unwrap(), Command::Sort(SortKey::None));
        assert_eq!(parse_command("show 2").unwrap(), Command::Show(2));
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(parse_command("frobnicate").is_err());
        assert!(parse_command("sort calories").is_err());
        assert!(parse_command("show 0").is_err());
    }

    #[test]
    fn show_resolves_card_position() {
        let state = state();
        match resolve(Command::Show(1), &state) {
            Step::Dispatch(Event::SelectRecord(record)) => assert_eq!(record.name.as_deref(), Some("Nutella")),
            other => panic!("unexpected step {other:?}"),
        }
        assert!(matches!(resolve(Command::Show(2), &state), Step::Notice(_)));
    }

    #[test]
    fn category_accepts_position_or_identifier() {
        let state = state();
        assert_eq!(
            resolve(Command::Category("1".into()), &state),
            Step::Dispatch(Event::SelectCategory("en:snacks".into()))
        );
        assert_eq!(
            resolve(Command::Category("en:beverages".into()), &state),
            Step::Dispatch(Event::SelectCategory("en:beverages".into()))
        );
        assert_eq!(
            resolve(Command::Category("7".into()), &state),
            Step::Dispatch(Event::SelectCategory("7".into()))
        );
    }

    #[test]
    fn categories_fetches_only_when_missing() {
        let mut state = state();
        assert_eq!(resolve(Command::Categories, &state), Step::ShowCategories { fetch: None });

        state.categories.clear();
        assert_eq!(
            resolve(Command::Categories, &state),
            Step::ShowCategories { fetch: Some(Event::LoadCategories) }
        );
    }
}
