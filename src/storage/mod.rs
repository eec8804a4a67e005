//! Storage layer for the persisted user preference.
//!
//! The only durable state is the display theme. It lives in a small JSON file
//! in the data directory, read at startup and rewritten on every toggle.
//!
//! # Modules
//!
//! - `backend`: [`PreferenceStore`] trait and the theme key
//! - `json`: JSON file implementation with atomic writes
//! - `models`: record types stored in the file

pub mod backend;
pub mod json;
pub mod models;

pub use backend::{PreferenceStore, THEME_KEY};
pub use json::JsonPreferences;
pub use models::PreferenceRecord;

/// File name of the preference store inside the data directory.
pub const PREFERENCES_FILE: &str = "preferences.json";
