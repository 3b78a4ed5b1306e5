//! Terminal UI for Lookout.
//!
//! This crate provides the Ratatui-based dashboard over the core sync layer.
//! All data arrives through `lookout-core`'s polling sources; the TUI only
//! renders their latest snapshots and feeds filter intents back.
//!
//! ## Hotkeys
//!
//! - `f` - Feed view
//! - `b` - Board view
//! - `p` - Posts view
//! - `a` - Cycle agent filter
//! - `t` - Cycle type filter
//! - `x` - Clear filters
//! - `r` - Refresh all sources
//! - `?` or `h` - Help
//! - `q` - Quit
//! - `Tab` - Cycle views
//! - `Esc` - Close help

pub mod app;
pub mod board_panel;
pub mod data;
pub mod event;
pub mod feed_panel;
pub mod posts_panel;
pub mod view;

pub use app::{App, AppResult};
pub use data::DataManager;
pub use event::{AppEvent, InputHandler};
pub use view::View;
