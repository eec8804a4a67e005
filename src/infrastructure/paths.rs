//! Data directory resolution and path expansion.
//!
//! Functions take the environment as a map so they can be exercised without
//! touching the process environment.

use std::collections::BTreeMap;
use std::path::PathBuf;

const APP_DIR: &str = "foodlens";

/// Resolves the directory holding the preference file and trace output.
///
/// In order of preference: `FOODLENS_DATA_DIR`, `$XDG_DATA_HOME/foodlens`,
/// `$HOME/.local/share/foodlens`, then `./.foodlens`.
///
/// # Examples
///
/// ```
/// use foodlens::infrastructure::get_data_dir;
/// use std::collections::BTreeMap;
/// use std::path::PathBuf;
///
/// let env = BTreeMap::from([("HOME".to_string(), "/home/ada".to_string())]);
/// assert_eq!(get_data_dir(&env), PathBuf::from("/home/ada/.local/share/foodlens"));
/// ```
#[must_use]
pub fn get_data_dir(env: &BTreeMap<String, String>) -> PathBuf {
    let non_empty = |key: &str| env.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(explicit) = non_empty("FOODLENS_DATA_DIR") {
        return PathBuf::from(expand_tilde(explicit, env));
    }
    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    if let Some(home) = non_empty("HOME") {
        return PathBuf::from(home).join(".local").join("share").join(APP_DIR);
    }
    PathBuf::from(".").join(format!(".{APP_DIR}"))
}

/// Expands a leading `~` to `$HOME`. Paths without one, or an unset
/// `HOME`, are returned unchanged.
///
/// # Examples
///
/// ```
/// use foodlens::infrastructure::expand_tilde;
/// use std::collections::BTreeMap;
///
/// let env = BTreeMap::from([("HOME".to_string(), "/home/ada".to_string())]);
/// assert_eq!(expand_tilde("~/data", &env), "/home/ada/data");
/// assert_eq!(expand_tilde("~", &env), "/home/ada");
/// assert_eq!(expand_tilde("/var/lib/foodlens", &env), "/var/lib/foodlens");
/// ```
#[must_use]
pub fn expand_tilde(path: &str, env: &BTreeMap<String, String>) -> String {
    let Some(home) = env.get("HOME").filter(|h| !h.is_empty()) else {
        return path.to_string();
    };

    if path == "~" {
        home.clone()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn explicit_dir_wins_and_expands_tilde() {
        let env = env(&[("FOODLENS_DATA_DIR", "~/fl"), ("HOME", "/home/ada"), ("XDG_DATA_HOME", "/xdg")]);
        assert_eq!(get_data_dir(&env), PathBuf::from("/home/ada/fl"));
    }

    #[test]
    fn xdg_before_home() {
        let env = env(&[("HOME", "/home/ada"), ("XDG_DATA_HOME", "/xdg")]);
        assert_eq!(get_data_dir(&env), PathBuf::from("/xdg/foodlens"));
    }

    #[test]
    fn falls_back_to_working_directory() {
        assert_eq!(get_data_dir(&env(&[("HOME", "  ")])), PathBuf::from("./.foodlens"));
        assert_eq!(expand_tilde("~/x", &BTreeMap::new()), "~/x");
    }
}
