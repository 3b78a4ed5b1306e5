//! Shared type definitions used across Lookout crates.
//!
//! These types mirror the remote feed API's payloads: agent status snapshots,
//! threaded activity items, and blog posts. The display payload carried by an
//! item is opaque to the sync layer and only interpreted by the open-item
//! predicate and the presentation code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an agent.
pub type AgentKey = String;

/// Timestamp type used throughout Lookout.
pub type Timestamp = DateTime<Utc>;

/// Get the current UTC timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Agent state as reported by the remote API.
///
/// The enumeration is owned by the API; unknown values deserialize as
/// [`AgentState::Offline`] rather than failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Agent is online but has no current task
    Idle,
    /// Agent is actively working
    Working,
    /// Agent is waiting on something external
    Blocked,
    /// Agent has not been seen recently
    #[default]
    #[serde(other)]
    Offline,
}

impl AgentState {
    /// Returns true if the agent counts toward the active-work summary.
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }

    /// Returns the status indicator for TUI display.
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Idle => "○",
            Self::Working => "●",
            Self::Blocked => "◐",
            Self::Offline => "·",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Working => write!(f, "working"),
            Self::Blocked => write!(f, "blocked"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// One agent's status as of the latest poll.
///
/// Ephemeral: replaced wholesale on every successful poll, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    /// Unique agent key
    pub key: AgentKey,
    /// Human display name
    #[serde(default)]
    pub display_name: String,
    /// Last time the agent reported in
    pub last_seen_at: Timestamp,
    /// Current state
    #[serde(default)]
    pub state: AgentState,
}

impl AgentStatus {
    /// Name to show in the UI: display name when present, key otherwise.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.key
        } else {
            &self.display_name
        }
    }
}

/// Kind of activity item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Issue opened/updated/closed
    Issue,
    /// Pull request activity
    PullRequest,
    /// Deploy event
    Deploy,
    /// Activity not tied to an issue/PR/deploy (announcements, notes)
    #[default]
    Standalone,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Issue => write!(f, "issue"),
            Self::PullRequest => write!(f, "pull_request"),
            Self::Deploy => write!(f, "deploy"),
            Self::Standalone => write!(f, "standalone"),
        }
    }
}

/// A unit of activity in the feed.
///
/// Items form threads: an item may declare a `parent_id` pointing at another
/// item in the same snapshot. `payload` is freeform display data owned by the
/// API; the sync layer only reads its `status` field for the open-item count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadedItem {
    /// Unique within one snapshot
    pub id: String,
    /// What kind of activity this is
    #[serde(default)]
    pub kind: ItemKind,
    /// Agent responsible, if any
    #[serde(default)]
    pub agent_key: Option<AgentKey>,
    /// When the activity happened
    pub timestamp: Timestamp,
    /// Parent item id when this is a reply within a thread
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Freeform display payload (opaque to the sync layer)
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ThreadedItem {
    /// Returns true if this item represents unresolved work.
    ///
    /// Open means the payload's `status` field is one of `open`,
    /// `in_progress`, `todo`, or `blocked` (case-insensitive). Items with no
    /// status field count as resolved.
    pub fn is_open(&self) -> bool {
        self.payload
            .get("status")
            .and_then(|v| v.as_str())
            .map(|s| {
                matches!(
                    s.to_ascii_lowercase().as_str(),
                    "open" | "in_progress" | "todo" | "blocked"
                )
            })
            .unwrap_or(false)
    }

    /// Title for display, falling back to the item id.
    pub fn title(&self) -> String {
        self.payload
            .get("title")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone())
    }
}

/// A blog post from the team feed. Display-only; no aggregation or filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    /// URL slug
    pub slug: String,
    /// Post title
    pub title: String,
    /// Publication date
    pub published_at: Timestamp,
    /// Short summary for list display
    #[serde(default)]
    pub summary: String,
}
