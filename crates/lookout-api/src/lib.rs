//! HTTP client for the Lookout feed API.
//!
//! This crate owns the remote fetch surface consumed by the sync layer:
//! agent status, the activity feed, board health, and blog posts. Each fetch
//! is a plain async function on [`ApiClient`] suitable for wrapping in a
//! `lookout_core::AsyncResource` producer.

pub mod board;
pub mod client;
pub mod error;

pub use board::{BoardHealth, StatusSegment};
pub use client::{ActivityResponse, AgentStatusResponse, ApiClient, BlogPostsResponse};
pub use error::{ApiError, Result};
