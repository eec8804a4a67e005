//! Application layer: the view-state coordinator.
//!
//! Sits between the interactive runtime (`main.rs`) and the gateway/worker
//! layers. It owns the browsing session state and the rules for how user
//! commands and fetch completions change it.
//!
//! # Architecture
//!
//! ```text
//! User Command → Event → handle_event → State Mutations → Actions → Side Effects
//!                              ↑                                        ↓
//!                              └───────── FetchCompleted ◄── Worker ────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effect commands emitted by the event handler
//! - [`handler`]: event processing and the transition rules
//! - [`modes`]: query mode, fetch purpose and user-facing error messages
//! - [`state`]: session state container and view model computation
//! - [`validity`]: the filter fetched batches pass through

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;
pub mod validity;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FetchPurpose, Query, QueryMode};
pub use state::{AppState, DEFAULT_PAGE_SIZE, LOAD_MORE_THRESHOLD};
