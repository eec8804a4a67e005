//! Preference store abstraction.
//!
//! The store holds string values under fixed keys. The only key in use is the
//! display theme, written on every toggle and read once at startup.

use crate::domain::error::Result;
use crate::storage::models::PreferenceRecord;
use crate::ui::theme::ThemeName;

/// Key under which the display theme is stored.
pub const THEME_KEY: &str = "foodlens-theme";

/// Abstraction over persistent preference backends.
///
/// # Implementations
///
/// - [`JsonPreferences`](crate::storage::JsonPreferences): JSON file with atomic writes
///
/// # Examples
///
/// ```no_run
/// use foodlens::storage::{JsonPreferences, PreferenceStore};
/// use foodlens::ui::ThemeName;
/// use std::path::PathBuf;
///
/// let mut store = JsonPreferences::new(PathBuf::from("/tmp/foodlens/preferences.json"))?;
/// store.save_theme(ThemeName::Light)?;
/// assert_eq!(store.load_theme()?, Some(ThemeName::Light));
/// # Ok::<(), foodlens::FoodlensError>(())
/// ```
pub trait PreferenceStore: Send {
    /// Reads the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<PreferenceRecord>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Reads the stored theme.
    ///
    /// An unrecognized stored value reads as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load_theme(&self) -> Result<Option<ThemeName>> {
        Ok(self.get(THEME_KEY)?.and_then(|record| {
            record
                .value
                .parse()
                .map_err(|e: String| tracing::debug!(error = %e, "ignoring stored theme"))
                .ok()
        }))
    }

    /// Stores the theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save_theme(&mut self, theme: ThemeName) -> Result<()> {
        self.set(THEME_KEY, theme.as_str())
    }
}
