//! # lookout-core
//!
//! Core library for the Lookout dashboard: shared types, the asynchronous
//! fetch lifecycle, polling, aggregation, and filtering.
//!
//! This crate provides:
//! - [`LookoutError`] - Error types for Lookout operations
//! - [`logging`] - Tracing setup and log management utilities
//! - [`types`] - Shared domain types (agents, activity items, posts)
//! - [`resource`] - The generic async fetch lifecycle ([`AsyncResource`])
//! - [`poller`] - Fixed-interval re-fetching ([`PollingSource`])
//! - [`aggregator`] - Merging status and item snapshots into one feed
//! - [`filter`] - Agent and kind filtering over the aggregated feed
//! - [`config`] - YAML configuration loading
//! - [`format`] - Display formatting helpers
//!
//! ## Example
//!
//! ```
//! use lookout_core::aggregator::aggregate;
//! use lookout_core::filter::{FilterEngine, FilterSelection};
//!
//! let view = aggregate(&[], &[]);
//! let engine = FilterEngine::default();
//! let visible = engine.apply(&view.items, &FilterSelection::default());
//! assert!(visible.is_empty());
//! ```

pub mod aggregator;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod logging;
pub mod poller;
pub mod resource;
pub mod types;

// Re-export main types for convenience
pub use aggregator::{aggregate, ActiveWorkSummary, ActivityView};
pub use config::Config;
pub use error::{LookoutError, Result};
pub use filter::{FilterEngine, FilterSelection, KindFilter, StandalonePolicy};
pub use logging::{init_logging, LogGuard};
pub use poller::PollingSource;
pub use resource::{AsyncResource, AsyncState, LoadStatus};
pub use types::{AgentState, AgentStatus, BlogPost, ItemKind, ThreadedItem};
