//! Side effects emitted by the event handler.
//!
//! The handler never performs I/O. It returns a `Vec<Action>` after each
//! event and the runtime executes them in order: spawning fetches on the
//! worker, writing the theme preference, or shutting down.

use crate::ui::theme::ThemeName;
use crate::worker::FetchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand a request to the fetch worker. Its completion comes back as
    /// `Event::FetchCompleted`.
    Fetch(FetchRequest),

    /// Write the theme preference to the store.
    PersistTheme(ThemeName),

    /// Leave the interactive session.
    Quit,
}
