//! Terminal presentation layer.
//!
//! ```text
//! AppState -> compute_viewmodel -> UIViewModel -> render -> ANSI text
//! ```
//!
//! - [`viewmodel`]: display-ready frame content
//! - [`renderer`]: frame assembly
//! - [`components`]: per-section renderers
//! - [`helpers`]: label and number formatting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_categories_to_string, render_to_string};
pub use theme::{Theme, ThemeName};
pub use viewmodel::{
    CategoryEntry, CategoryMenu, DetailView, EmptyState, FooterInfo, HeaderInfo, LoadMoreState, NutrientRow,
    ProductCard, UIViewModel,
};
