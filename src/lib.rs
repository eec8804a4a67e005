//! foodlens: a terminal browser for the Open Food Facts product catalog.
//!
//! foodlens lists products page by page, searches by name, looks up a single
//! barcode, filters by category and shows a nutrition detail view. Results
//! can be re-sorted locally by name or Nutri-Score grade.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Interactive runtime (main.rs, cli)                 │  ← stdin commands
//! └─────────────────────────────────────────────────────┘
//!                        │ Event
//! ┌─────────────────────────────────────────────────────┐
//! │  Application layer (app/)                           │  ← view-state coordinator
//! │  - transitions, stale-completion guard              │
//! │  - validity filter, view model computation          │
//! └─────────────────────────────────────────────────────┘
//!         │ Action             │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Worker        │   │ Storage       │   │ UI            │
//! │ (worker/)     │   │ (storage/)    │   │ (ui/)         │
//! │ - fetch tasks │   │ - theme pref  │   │ - rendering   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Query gateway (gateway/)                           │  ← HTTP, decoding,
//! │  - Catalog trait, CatalogClient                     │    sorting, shaping
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Domain types live in [`domain`], data directory resolution in
//! [`infrastructure`], and span export in [`observability`].
//!
//! # Example
//!
//! ```
//! use foodlens::app::{handle_event, Action, Event};
//! use foodlens::storage::JsonPreferences;
//! use foodlens::{initialize, Config};
//!
//! let dir = tempfile::tempdir()?;
//! let prefs = JsonPreferences::new(dir.path().join("preferences.json"))?;
//! let mut state = initialize(&Config::default(), &prefs);
//!
//! let (render, actions) = handle_event(&mut state, &Event::Startup)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_), Action::Fetch(_)]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod cli;
pub mod domain;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{FoodlensError, ProductRecord, Result};
pub use ui::Theme;

use gateway::{ClientSettings, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::PreferenceStore;

/// Largest page the catalog serves in one response.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Runtime configuration.
///
/// Sources, lowest precedence first: [`Config::default`], a TOML file
/// ([`Config::apply_file`]), `FOODLENS_*` environment variables
/// ([`Config::apply_env`]), then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Catalog host, e.g. `https://world.openfoodfacts.org`.
    pub base_url: String,

    /// Records requested per page. Default: 24
    pub page_size: u32,

    /// Per-request timeout in seconds. Default: 15
    pub request_timeout_secs: u64,

    pub user_agent: String,

    /// Overrides the resolved data directory.
    pub data_dir: Option<PathBuf>,

    /// Filter directive used when `RUST_LOG` is unset. Default: `"info"`
    pub trace_level: Option<String>,

    /// Also print log events to stderr.
    pub log_to_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: app::DEFAULT_PAGE_SIZE,
            request_timeout_secs: gateway::DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            data_dir: None,
            trace_level: None,
            log_to_stderr: false,
        }
    }
}

/// On-disk form of [`Config`]; every key is optional.
///
/// ```toml
/// base_url = "https://world.openfoodfacts.org"
/// page_size = 24
/// request_timeout_secs = 15
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub page_size: Option<u32>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub trace_level: Option<String>,
    pub log_to_stderr: Option<bool>,
}

impl ConfigFile {
    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`FoodlensError::Config`] if the file cannot be read or does
    /// not parse.
    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FoodlensError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&contents).map_err(|e| FoodlensError::Config(format!("invalid {}: {e}", path.display())))
    }
}

impl Config {
    /// Overlays values present in a config file.
    #[must_use]
    pub fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(base_url) = file.base_url {
            self.base_url = base_url;
        }
        if let Some(page_size) = file.page_size {
            self.page_size = page_size;
        }
        if let Some(timeout) = file.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(user_agent) = file.user_agent {
            self.user_agent = user_agent;
        }
        if file.data_dir.is_some() {
            self.data_dir = file.data_dir;
        }
        if file.trace_level.is_some() {
            self.trace_level = file.trace_level;
        }
        if let Some(log_to_stderr) = file.log_to_stderr {
            self.log_to_stderr = log_to_stderr;
        }
        self.sanitized()
    }

    /// Overlays `FOODLENS_*` variables from an environment map.
    ///
    /// Blank values are ignored; unparsable numbers keep the current value.
    ///
    /// # Example
    ///
    /// ```
    /// use foodlens::Config;
    /// use std::collections::BTreeMap;
    ///
    /// let env = BTreeMap::from([
    ///     ("FOODLENS_PAGE_SIZE".to_string(), "48".to_string()),
    ///     ("FOODLENS_TIMEOUT_SECS".to_string(), "soon".to_string()),
    /// ]);
    ///
    /// let config = Config::default().apply_env(&env);
    /// assert_eq!(config.page_size, 48);
    /// assert_eq!(config.request_timeout_secs, 15);
    /// ```
    #[must_use]
    pub fn apply_env(mut self, env: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(base_url) = get("FOODLENS_BASE_URL") {
            self.base_url = base_url.to_string();
        }
        if let Some(page_size) = get("FOODLENS_PAGE_SIZE").and_then(|v| v.parse().ok()) {
            self.page_size = page_size;
        }
        if let Some(timeout) = get("FOODLENS_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.request_timeout_secs = timeout;
        }
        if let Some(user_agent) = get("FOODLENS_USER_AGENT") {
            self.user_agent = user_agent.to_string();
        }
        if let Some(level) = get("FOODLENS_TRACE_LEVEL") {
            self.trace_level = Some(level.to_string());
        }
        if let Some(flag) = get("FOODLENS_LOG_STDERR") {
            self.log_to_stderr = matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        self.sanitized()
    }

    /// Defaults, then the optional file, then the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `file` is given but cannot be read or parsed.
    pub fn load(file: Option<&Path>, env: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = file {
            config = config.apply_file(ConfigFile::read(path)?);
        }
        Ok(config.apply_env(env))
    }

    /// Clamps out-of-range values back into the ranges the catalog accepts.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = app::DEFAULT_PAGE_SIZE;
        }
        self.page_size = self.page_size.min(MAX_PAGE_SIZE);
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = gateway::DEFAULT_TIMEOUT.as_secs();
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// The configured data directory with `~` expanded, or the one resolved
    /// from `env`.
    #[must_use]
    pub fn data_dir(&self, env: &BTreeMap<String, String>) -> PathBuf {
        match &self.data_dir {
            Some(dir) => match dir.to_str() {
                Some(text) => PathBuf::from(infrastructure::expand_tilde(text, env)),
                None => dir.clone(),
            },
            None => infrastructure::get_data_dir(env),
        }
    }
}

/// Creates the session state, restoring the persisted theme.
///
/// A missing or unreadable preference falls back to the dark theme.
pub fn initialize(config: &Config, preferences: &dyn PreferenceStore) -> AppState {
    let _span = tracing::debug_span!("initialize", page_size = config.page_size).entered();

    let theme = match preferences.load_theme() {
        Ok(Some(theme)) => theme,
        Ok(None) => ui::ThemeName::default(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read theme preference, using default");
            ui::ThemeName::default()
        }
    };
    tracing::debug!(theme = %theme, "session state created");

    AppState::new(config.page_size, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{PreferenceRecord, THEME_KEY};
    use crate::ui::ThemeName;

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<PreferenceRecord>> {
            Err(FoodlensError::Storage("disk on fire".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(FoodlensError::Storage("disk on fire".to_string()))
        }
    }

    struct MemoryStore(BTreeMap<String, PreferenceRecord>);

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<PreferenceRecord>> {
            Ok(self.0.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.insert(key.to_string(), PreferenceRecord::new(value));
            Ok(())
        }
    }

    #[test]
    fn initialize_restores_saved_theme() {
        let mut store = MemoryStore(BTreeMap::new());
        store.set(THEME_KEY, "light").unwrap();

        let state = initialize(&Config::default(), &store);
        assert_eq!(state.theme, ThemeName::Light);
        assert_eq!(state.page_size, 24);
    }

    #[test]
    fn initialize_survives_unreadable_store() {
        let state = initialize(&Config::default(), &FailingStore);
        assert_eq!(state.theme, ThemeName::Dark);
    }

    #[test]
    fn file_then_env_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foodlens.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:9000/\"\npage_size = 12\ntrace_level = \"debug\"\n",
        )
        .unwrap();

        let env = BTreeMap::from([("FOODLENS_PAGE_SIZE".to_string(), "30".to_string())]);
        let config = Config::load(Some(&path), &env).unwrap();

        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.page_size, 30);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foodlens.toml");
        std::fs::write(&path, "pagesize = 12\n").unwrap();

        assert!(matches!(Config::load(Some(&path), &BTreeMap::new()), Err(FoodlensError::Config(_))));
        assert!(matches!(
            Config::load(Some(&dir.path().join("missing.toml")), &BTreeMap::new()),
            Err(FoodlensError::Config(_))
        ));
    }

    #[test]
    fn page_size_is_clamped() {
        let zero = Config { page_size: 0, ..Config::default() }.sanitized();
        assert_eq!(zero.page_size, 24);
        let huge = Config { page_size: 1000, ..Config::default() }.sanitized();
        assert_eq!(huge.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let env = BTreeMap::from([("HOME".to_string(), "/home/ada".to_string())]);
        let config = Config {
            data_dir: Some(PathBuf::from("/srv/foodlens")),
            ..Config::default()
        };
        assert_eq!(config.data_dir(&env), PathBuf::from("/srv/foodlens"));
        let home_relative = Config {
            data_dir: Some(PathBuf::from("~/foodlens")),
            ..Config::default()
        };
        assert_eq!(home_relative.data_dir(&env), PathBuf::from("/home/ada/foodlens"));
        assert_eq!(
            Config::default().data_dir(&env),
            PathBuf::from("/home/ada/.local/share/foodlens")
        );
    }

    #[test]
    fn client_settings_carry_timeout() {
        let config = Config {
            request_timeout_secs: 3,
            ..Config::default()
        };
        assert_eq!(config.client_settings().timeout, Duration::from_secs(3));
    }
}
