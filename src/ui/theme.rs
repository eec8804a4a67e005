//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in themes ship with the binary, `dark` (default) and `light`,
//! embedded from TOML files. The active [`ThemeName`] is the one persisted
//! user preference.
//!
//! # TOML Format
//!
//! ```toml
//! name = "dark"
//!
//! [colors]
//! header_fg = "#e6edf3"
//! text_normal = "#c9d1d9"
//! text_dim = "#8b949e"
//! border = "#30363d"
//! accent = "#58a6ff"
//! error_fg = "#ff7b72"
//! grade_a = "#038141"
//! grade_b = "#85bb2f"
//! grade_c = "#fecb02"
//! grade_d = "#ee8100"
//! grade_e = "#e63e11"
//! grade_unknown = "#6e7681"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two selectable themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    /// The other theme.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Color scheme used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: ThemeName,
    pub colors: ThemeColors,
}

/// Color definitions as hex strings (e.g. `"#c9d1d9"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text (brands, footers, hints).
    pub text_dim: String,
    pub border: String,
    /// Card titles, selection markers, prompts.
    pub accent: String,
    /// Error banner text.
    pub error_fg: String,

    pub grade_a: String,
    pub grade_b: String,
    pub grade_c: String,
    pub grade_d: String,
    pub grade_e: String,
    /// Badge color for records without a grade.
    pub grade_unknown: String,
}

impl Theme {
    /// Parses the embedded TOML for a built-in theme.
    ///
    /// # Errors
    ///
    /// Returns a description of the TOML error if the embedded file does not
    /// parse.
    pub fn builtin(name: ThemeName) -> Result<Self, String> {
        let toml_str = match name {
            ThemeName::Dark => include_str!("../../themes/dark.toml"),
            ThemeName::Light => include_str!("../../themes/light.toml"),
        };

        toml::from_str(toml_str).map_err(|e| format!("Failed to parse {name} theme TOML: {e}"))
    }

    /// Loads a built-in theme, falling back to a plain palette if it does
    /// not parse.
    #[must_use]
    pub fn from_name(name: ThemeName) -> Self {
        Self::builtin(name).unwrap_or_else(|e| {
            tracing::warn!(error = %e, theme = %name, "using fallback palette");
            Self::plain(name)
        })
    }

    /// Minimal palette with no dependency on the embedded files.
    fn plain(name: ThemeName) -> Self {
        let (fg, dim) = match name {
            ThemeName::Dark => ("#ffffff", "#a0a0a0"),
            ThemeName::Light => ("#000000", "#606060"),
        };
        let fixed = |hex: &str| hex.to_string();

        Self {
            name,
            colors: ThemeColors {
                header_fg: fixed(fg),
                header_bg: None,
                text_normal: fixed(fg),
                text_dim: fixed(dim),
                border: fixed(dim),
                accent: fixed(fg),
                error_fg: fixed("#ff0000"),
                grade_a: fixed("#038141"),
                grade_b: fixed("#85bb2f"),
                grade_c: fixed("#fecb02"),
                grade_d: fixed("#ee8100"),
                grade_e: fixed("#e63e11"),
                grade_unknown: fixed(dim),
            },
        }
    }

    /// Badge color for a nutrition grade letter.
    #[must_use]
    pub fn grade_color(&self, grade: Option<&str>) -> &str {
        match grade {
            Some("a") => &self.colors.grade_a,
            Some("b") => &self.colors.grade_b,
            Some("c") => &self.colors.grade_c,
            Some("d") => &self.colors.grade_d,
            Some("e") => &self.colors.grade_e,
            _ => &self.colors.grade_unknown,
        }
    }

    /// Converts a hex color to an RGB tuple; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground escape (`\x1b[38;2;r;g;bm`).
    ///
    /// ```
    /// use foodlens::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#038141"), "\u{1b}[38;2;3;129;65m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(ThemeName::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        for name in [ThemeName::Dark, ThemeName::Light] {
            let theme = Theme::builtin(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn toggle_flips_between_the_two_themes() {
        assert_eq!(ThemeName::Dark.toggle(), ThemeName::Light);
        assert_eq!(ThemeName::Light.toggle().toggle(), ThemeName::Light);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Light".parse::<ThemeName>(), Ok(ThemeName::Light));
        assert!("sepia".parse::<ThemeName>().is_err());
    }

    #[test]
    fn grades_map_to_their_colors() {
        let theme = Theme::default();
        assert_eq!(theme.grade_color(Some("a")), theme.colors.grade_a);
        assert_eq!(theme.grade_color(None), theme.colors.grade_unknown);
        assert_eq!(theme.grade_color(Some("x")), theme.colors.grade_unknown);
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#abc"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("0d1117"), "\u{1b}[48;2;13;17;23m");
    }
}
