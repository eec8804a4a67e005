//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};

use std::collections::BTreeMap;

/// Snapshot of the process environment as an ordered map.
///
/// Configuration and path resolution read from this map rather than from
/// `std::env` directly. Variables that are not valid UTF-8 are skipped.
#[must_use]
pub fn env_map() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
