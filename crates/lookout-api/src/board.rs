//! Board health payload and status-bar derivation.
//!
//! The board endpoint reports item counts per status column. Display order
//! is a fixed preference list (`Done`, `In Progress`, `Todo`); any other
//! status the server reports is appended afterward in the order the response
//! listed it (serde_json's `preserve_order` feature keeps that order).

use serde::{Deserialize, Serialize};

/// Fixed display preference for well-known status columns.
const STATUS_PREFERENCE: [&str; 3] = ["Done", "In Progress", "Todo"];

/// Response payload of `GET /api/board/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardHealth {
    /// Total items on the board
    pub total_items: u64,
    /// Item count per status column, in server order
    pub by_status: serde_json::Map<String, serde_json::Value>,
    /// Items still in draft
    #[serde(default)]
    pub draft_items: u64,
}

/// One segment of the board status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSegment {
    /// Status column name
    pub status: String,
    /// Item count in this column
    pub count: u64,
    /// Share of the board, 0-100
    pub percent: f64,
}

impl BoardHealth {
    /// Derive ordered status-bar segments.
    ///
    /// Preferred statuses come first in the fixed order, then any remaining
    /// keys in response order. Statuses absent from the response are skipped
    /// rather than rendered at zero. An empty board yields no segments.
    pub fn segments(&self) -> Vec<StatusSegment> {
        if self.total_items == 0 {
            return Vec::new();
        }

        let mut segments = Vec::with_capacity(self.by_status.len());
        for status in STATUS_PREFERENCE {
            if let Some(count) = self.count_for(status) {
                segments.push(self.segment(status, count));
            }
        }
        for (status, value) in &self.by_status {
            if STATUS_PREFERENCE.contains(&status.as_str()) {
                continue;
            }
            if let Some(count) = value.as_u64() {
                segments.push(self.segment(status, count));
            }
        }
        segments
    }

    /// Count of items in one status column, if reported.
    pub fn count_for(&self, status: &str) -> Option<u64> {
        self.by_status.get(status).and_then(|v| v.as_u64())
    }

    fn segment(&self, status: &str, count: u64) -> StatusSegment {
        StatusSegment {
            status: status.to_string(),
            count,
            percent: count as f64 * 100.0 / self.total_items as f64,
        }
    }
}
