//! Agent and kind filtering over the aggregated feed.
//!
//! Filtering is pure and order-preserving: it relies on the aggregator's
//! ordering and only drops items. The two filter axes are independent and
//! conjunctive. Selection state itself is trivial (one active value per
//! axis, set directly by user action).

use serde::{Deserialize, Serialize};

use crate::types::{ItemKind, ThreadedItem};

/// Type-category filter axis. `All` is the neutral value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    /// No constraint on kind
    #[default]
    All,
    /// Only issues
    Issues,
    /// Only pull requests
    Prs,
    /// Only deploys
    Deploys,
    /// Only standalone activity
    Standalone,
}

impl KindFilter {
    /// Returns true if the given item kind passes this filter.
    pub fn matches(&self, kind: ItemKind) -> bool {
        match self {
            Self::All => true,
            Self::Issues => kind == ItemKind::Issue,
            Self::Prs => kind == ItemKind::PullRequest,
            Self::Deploys => kind == ItemKind::Deploy,
            Self::Standalone => kind == ItemKind::Standalone,
        }
    }

    /// Next filter in the cycling order (used by the kind-filter hotkey).
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Issues,
            Self::Issues => Self::Prs,
            Self::Prs => Self::Deploys,
            Self::Deploys => Self::Standalone,
            Self::Standalone => Self::All,
        }
    }

    /// Short label for the filter bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Issues => "issues",
            Self::Prs => "prs",
            Self::Deploys => "deploys",
            Self::Standalone => "standalone",
        }
    }
}

impl std::fmt::Display for KindFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Current filter selections. `None` / `All` mean no constraint on that axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSelection {
    /// Keep only items attributed to this agent key
    pub agent: Option<String>,
    /// Keep only items of this kind
    pub kind: KindFilter,
}

impl FilterSelection {
    /// Returns true iff either axis deviates from its neutral value.
    ///
    /// Drives the "clear filters" affordance.
    pub fn has_active_filters(&self) -> bool {
        self.agent.is_some() || self.kind != KindFilter::All
    }

    /// Reset both axes to neutral.
    pub fn clear(&mut self) {
        self.agent = None;
        self.kind = KindFilter::All;
    }
}

/// How agent-less standalone items behave under an active agent filter.
///
/// Standalone items carry no agent by design (announcements, deploy notes),
/// so whether an agent selection hides them is a product choice rather than
/// something the data determines. The default hides them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StandalonePolicy {
    /// An agent selection hides agent-less standalone items
    #[default]
    Exclude,
    /// Agent-less standalone items stay visible under any agent selection
    Include,
}

/// Applies filter selections to an aggregated item list.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine {
    standalone_policy: StandalonePolicy,
}

impl FilterEngine {
    /// Create an engine with an explicit standalone policy.
    pub fn new(standalone_policy: StandalonePolicy) -> Self {
        Self { standalone_policy }
    }

    /// The configured standalone policy.
    pub fn standalone_policy(&self) -> StandalonePolicy {
        self.standalone_policy
    }

    /// Apply the selection, preserving input order.
    ///
    /// The kind axis always applies: a kind filter excludes non-matching
    /// items regardless of the agent axis. Under an agent selection, items
    /// with no agent are dropped unless they are standalone and the policy
    /// is [`StandalonePolicy::Include`].
    pub fn apply(&self, items: &[ThreadedItem], selection: &FilterSelection) -> Vec<ThreadedItem> {
        items
            .iter()
            .filter(|item| self.passes(item, selection))
            .cloned()
            .collect()
    }

    fn passes(&self, item: &ThreadedItem, selection: &FilterSelection) -> bool {
        if !selection.kind.matches(item.kind) {
            return false;
        }
        match (&selection.agent, &item.agent_key) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => wanted == actual,
            (Some(_), None) => {
                item.kind == ItemKind::Standalone
                    && self.standalone_policy == StandalonePolicy::Include
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: &str, kind: ItemKind, agent: Option<&str>) -> ThreadedItem {
        ThreadedItem {
            id: id.into(),
            kind,
            agent_key: agent.map(Into::into),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            parent_id: None,
            payload: serde_json::json!({}),
        }
    }

    fn sample() -> Vec<ThreadedItem> {
        vec![
            item("1", ItemKind::Issue, Some("po")),
            item("2", ItemKind::PullRequest, Some("qa")),
            item("3", ItemKind::Deploy, None),
            item("4", ItemKind::Standalone, None),
            item("5", ItemKind::Issue, Some("qa")),
        ]
    }

    fn ids(items: &[ThreadedItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_neutral_selection_is_identity() {
        let items = sample();
        let out = FilterEngine::default().apply(&items, &FilterSelection::default());
        assert_eq!(out, items);
    }

    #[test]
    fn test_has_active_filters() {
        assert!(!FilterSelection::default().has_active_filters());
        assert!(FilterSelection {
            agent: Some("po".into()),
            kind: KindFilter::All
        }
        .has_active_filters());
        assert!(FilterSelection {
            agent: None,
            kind: KindFilter::Deploys
        }
        .has_active_filters());
    }

    #[test]
    fn test_clear_resets_both_axes() {
        let mut selection = FilterSelection {
            agent: Some("po".into()),
            kind: KindFilter::Issues,
        };
        selection.clear();
        assert!(!selection.has_active_filters());
    }

    #[test]
    fn test_kind_filter() {
        let items = sample();
        let selection = FilterSelection {
            agent: None,
            kind: KindFilter::Issues,
        };
        let out = FilterEngine::default().apply(&items, &selection);
        assert_eq!(ids(&out), vec!["1", "5"]);
    }

    #[test]
    fn test_agent_filter_drops_agentless_items() {
        let items = sample();
        let selection = FilterSelection {
            agent: Some("qa".into()),
            kind: KindFilter::All,
        };
        let out = FilterEngine::default().apply(&items, &selection);
        assert_eq!(ids(&out), vec!["2", "5"]);
    }

    #[test]
    fn test_kind_filter_applies_regardless_of_agent_filter() {
        let items = sample();
        let selection = FilterSelection {
            agent: Some("qa".into()),
            kind: KindFilter::Issues,
        };
        let out = FilterEngine::default().apply(&items, &selection);
        assert_eq!(ids(&out), vec!["5"]);
    }

    #[test]
    fn test_standalone_policy_include() {
        let items = sample();
        let selection = FilterSelection {
            agent: Some("po".into()),
            kind: KindFilter::All,
        };
        let out = FilterEngine::new(StandalonePolicy::Include).apply(&items, &selection);
        // Standalone "4" survives; agent-less deploy "3" never does
        assert_eq!(ids(&out), vec!["1", "4"]);
    }

    #[test]
    fn test_standalone_policy_exclude_is_default() {
        let items = sample();
        let selection = FilterSelection {
            agent: Some("po".into()),
            kind: KindFilter::All,
        };
        let out = FilterEngine::default().apply(&items, &selection);
        assert_eq!(ids(&out), vec!["1"]);
    }

    #[test]
    fn test_order_preserved() {
        let items = vec![
            item("z", ItemKind::Issue, Some("po")),
            item("a", ItemKind::Issue, Some("po")),
            item("m", ItemKind::Issue, Some("po")),
        ];
        let selection = FilterSelection {
            agent: Some("po".into()),
            kind: KindFilter::Issues,
        };
        let out = FilterEngine::default().apply(&items, &selection);
        assert_eq!(ids(&out), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_kind_filter_cycle_returns_to_all() {
        let mut filter = KindFilter::All;
        for _ in 0..5 {
            filter = filter.next();
        }
        assert_eq!(filter, KindFilter::All);
    }
}
